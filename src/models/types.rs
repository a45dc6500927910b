use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Market cities the agency staffs shows in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "location_code")]
pub enum Location {
    ATL,
    NYC,
    LA,
    DAL,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "show_type")]
pub enum ShowType {
    Gift,
    Apparel,
    Bridal,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "season")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "staff_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StaffStatus {
    Active,
    Inactive,
    OnLeave,
}

impl Default for StaffStatus {
    fn default() -> Self {
        StaffStatus::Active
    }
}

/// Declaration order is the fixed display order for grouped booking views.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "booking_status")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_status_uses_snake_case_on_the_wire() {
        let json = serde_json::to_string(&StaffStatus::OnLeave).unwrap();
        assert_eq!(json, "\"on_leave\"");
    }

    #[test]
    fn booking_status_orders_in_display_order() {
        assert!(BookingStatus::Pending < BookingStatus::Confirmed);
        assert!(BookingStatus::Confirmed < BookingStatus::Completed);
        assert!(BookingStatus::Completed < BookingStatus::Cancelled);
    }
}
