use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::types::{Location, Season, ShowType};

/// A trade show. Shows are effectively immutable once created; there is no
/// update route.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: Uuid,
    pub location: Location,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub show_type: ShowType,
    pub season: Season,
    pub created_at: DateTime<Utc>,
}
