use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::types::BookingStatus;
use crate::error::{AppResult, FieldErrors};
use crate::staffing::DayEntry;

const MAX_NOTES_LEN: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingInput {
    pub show_id: Uuid,
    pub client_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// When omitted or empty the plan is derived from the date range (one
    /// day-entry per day, headcount 1, no assignments).
    #[serde(default)]
    pub daily_staffing: Vec<DayEntry>,
    pub notes: Option<String>,
    pub status: Option<BookingStatus>,
}

impl CreateBookingInput {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        if self.end_date < self.start_date {
            errors.push("endDate", "End date must be after start date");
        }

        validate_day_entries(&self.daily_staffing, &mut errors);
        validate_notes(self.notes.as_deref(), &mut errors);

        errors.into_result()
    }
}

/// Explicit partial-update DTO for a booking. Changing the date range without
/// supplying `dailyStaffing` regenerates the plan from the new range, which
/// discards assignments; callers are expected to warn the user first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingInput {
    pub show_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub daily_staffing: Option<Vec<DayEntry>>,
    pub notes: Option<String>,
    pub status: Option<BookingStatus>,
}

impl UpdateBookingInput {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.push("endDate", "End date must be after start date");
            }
        }

        if let Some(days) = &self.daily_staffing {
            validate_day_entries(days, &mut errors);
        }
        validate_notes(self.notes.as_deref(), &mut errors);

        errors.into_result()
    }

    pub fn is_empty(&self) -> bool {
        self.show_id.is_none()
            && self.client_id.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.daily_staffing.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }
}

fn validate_day_entries(days: &[DayEntry], errors: &mut FieldErrors) {
    for (i, day) in days.iter().enumerate() {
        if day.staff_needed < 1 {
            errors.push(
                &format!("dailyStaffing[{}].staffNeeded", i),
                "At least one staff member is needed per day",
            );
        }
    }
}

fn validate_notes(notes: Option<&str>, errors: &mut FieldErrors) {
    if notes.is_some_and(|n| n.len() > MAX_NOTES_LEN) {
        errors.push("notes", "Notes cannot be more than 1000 characters");
    }
}

/// Body for the per-day (and all-days) headcount routes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetHeadcountInput {
    pub count: u32,
}

/// Body for the slot-assignment route. `staffId: null` clears the slot.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignSlotInput {
    pub staff_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::staffing::expand_range;
    use crate::AppError;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn zero_headcount_entries_are_rejected_by_index() {
        let mut days = expand_range(date("2025-05-01"), date("2025-05-02")).unwrap();
        days[1].staff_needed = 0;

        let input = CreateBookingInput {
            show_id: Uuid::from_u128(1),
            client_id: Uuid::from_u128(2),
            start_date: date("2025-05-01"),
            end_date: date("2025-05-02"),
            daily_staffing: days,
            notes: None,
            status: None,
        };

        match input.validate() {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "dailyStaffing[1].staffNeeded");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn overlong_notes_are_rejected() {
        let input = CreateBookingInput {
            show_id: Uuid::from_u128(1),
            client_id: Uuid::from_u128(2),
            start_date: date("2025-05-01"),
            end_date: date("2025-05-02"),
            daily_staffing: vec![],
            notes: Some("x".repeat(1001)),
            status: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_with_no_fields_is_detected() {
        assert!(UpdateBookingInput::default().is_empty());
        let input = UpdateBookingInput {
            status: Some(BookingStatus::Confirmed),
            ..Default::default()
        };
        assert!(!input.is_empty());
    }
}
