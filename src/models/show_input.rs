use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::types::{Location, Season, ShowType};
use crate::error::{AppResult, FieldErrors};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateShowInput {
    pub location: Location,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub show_type: ShowType,
    pub season: Season,
}

impl CreateShowInput {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        if self.end_date < self.start_date {
            errors.push("endDate", "End date must be after start date");
        }

        errors.into_result()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ShowMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn end_date_must_not_precede_start_date() {
        let input = CreateShowInput {
            location: Location::NYC,
            start_date: date("2025-07-10"),
            end_date: date("2025-07-08"),
            show_type: ShowType::Gift,
            season: Season::Summer,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn single_day_show_is_valid() {
        let input = CreateShowInput {
            location: Location::DAL,
            start_date: date("2025-07-10"),
            end_date: date("2025-07-10"),
            show_type: ShowType::Bridal,
            season: Season::Summer,
        };
        assert!(input.validate().is_ok());
    }
}
