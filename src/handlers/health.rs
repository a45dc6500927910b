use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{AppResult, AppState};

/// GET /health - liveness plus a database round-trip, so a wedged pool shows
/// up here before it shows up as failing bookings.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database reachable"),
        (status = 500, description = "Database unreachable")
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> AppResult<Json<Value>> {
    sqlx::query("SELECT 1").execute(&state.db).await?;

    Ok(Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
    })))
}
