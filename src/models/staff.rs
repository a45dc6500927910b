use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::types::{Location, StaffStatus};

/// A staff member on the agency's roster. Referenced (never embedded) by
/// booking day entries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub locations: Vec<Location>,
    pub birthday: NaiveDate,
    pub college: Option<String>,
    pub shoe_size: Option<String>,
    pub dress_size: Option<String>,
    pub photo_url: Option<String>,
    pub resume_url: Option<String>,
    pub days_worked: i32,
    pub status: StaffStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
