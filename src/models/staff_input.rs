use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::types::{Location, StaffStatus};
use crate::error::{AppResult, FieldErrors};

const MAX_NAME_LEN: usize = 60;

/// Input DTO for creating a staff member.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub locations: Vec<Location>,
    pub birthday: Option<NaiveDate>,
    pub college: Option<String>,
    pub shoe_size: Option<String>,
    pub dress_size: Option<String>,
    pub photo_url: Option<String>,
    pub resume_url: Option<String>,
    pub days_worked: Option<i32>,
    pub status: Option<StaffStatus>,
    pub notes: Option<String>,
}

impl CreateStaffInput {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        if self.name.trim().is_empty() {
            errors.push("name", "Please provide a name");
        } else if self.name.len() > MAX_NAME_LEN {
            errors.push("name", "Name cannot be more than 60 characters");
        }

        if self.email.trim().is_empty() {
            errors.push("email", "Please provide an email");
        }

        if self.locations.is_empty() {
            errors.push("locations", "Please provide at least one location");
        }

        if self.birthday.is_none() {
            errors.push("birthday", "Please provide a birthday");
        }

        if self.days_worked.is_some_and(|d| d < 0) {
            errors.push("daysWorked", "Days worked cannot be negative");
        }

        errors.into_result()
    }
}

/// Explicit partial-update DTO for a staff member; absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStaffInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub locations: Option<Vec<Location>>,
    pub birthday: Option<NaiveDate>,
    pub college: Option<String>,
    pub shoe_size: Option<String>,
    pub dress_size: Option<String>,
    pub photo_url: Option<String>,
    pub resume_url: Option<String>,
    pub days_worked: Option<i32>,
    pub status: Option<StaffStatus>,
    pub notes: Option<String>,
}

impl UpdateStaffInput {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.push("name", "Name cannot be empty");
            } else if name.len() > MAX_NAME_LEN {
                errors.push("name", "Name cannot be more than 60 characters");
            }
        }

        if let Some(email) = &self.email {
            if email.trim().is_empty() {
                errors.push("email", "Email cannot be empty");
            }
        }

        if let Some(locations) = &self.locations {
            if locations.is_empty() {
                errors.push("locations", "Please provide at least one location");
            }
        }

        if self.days_worked.is_some_and(|d| d < 0) {
            errors.push("daysWorked", "Days worked cannot be negative");
        }

        errors.into_result()
    }
}

/// Response after a staff deletion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StaffMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;

    fn valid_input() -> CreateStaffInput {
        CreateStaffInput {
            name: "Dana Reeves".to_string(),
            email: "dana@example.com".to_string(),
            phone: None,
            locations: vec![Location::ATL],
            birthday: Some(NaiveDate::from_ymd_opt(1998, 4, 12).unwrap()),
            college: None,
            shoe_size: None,
            dress_size: None,
            photo_url: None,
            resume_url: None,
            days_worked: None,
            status: None,
            notes: None,
        }
    }

    #[test]
    fn valid_create_input_passes() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn create_lists_every_offending_field() {
        let input = CreateStaffInput {
            name: "".to_string(),
            email: " ".to_string(),
            locations: vec![],
            birthday: None,
            ..valid_input()
        };

        match input.validate() {
            Err(AppError::Validation(fields)) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, ["name", "email", "locations", "birthday"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn create_rejects_overlong_name() {
        let input = CreateStaffInput {
            name: "x".repeat(61),
            ..valid_input()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_allows_all_fields_absent() {
        assert!(UpdateStaffInput::default().validate().is_ok());
    }

    #[test]
    fn update_rejects_emptied_locations() {
        let input = UpdateStaffInput {
            locations: Some(vec![]),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }
}
