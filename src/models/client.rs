use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;

/// A contact person at a client company, embedded in the client record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A client company the agency places staff for.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub company_name: String,
    pub category: String,
    pub website: Option<String>,
    pub booth_location: Option<String>,
    #[schema(value_type = Vec<Contact>)]
    pub contacts: Json<Vec<Contact>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
