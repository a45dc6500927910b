use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    models::{CreateShowInput, Show, ShowMutationResponse},
    AppError, AppResult, AppState,
};

/// GET /api/shows - upcoming order
#[utoipa::path(
    get,
    path = "/api/shows",
    responses(
        (status = 200, description = "All shows sorted by start date", body = Vec<Show>)
    ),
    tag = "shows"
)]
pub async fn get_shows(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Show>>> {
    let shows = sqlx::query_as::<_, Show>("SELECT * FROM shows ORDER BY start_date")
        .fetch_all(&state.db)
        .await?;

    Ok(Json(shows))
}

/// POST /api/shows - shows are immutable after creation; there is no update
/// route.
#[utoipa::path(
    post,
    path = "/api/shows",
    request_body = CreateShowInput,
    responses(
        (status = 200, description = "Show created", body = Show),
        (status = 422, description = "End date before start date")
    ),
    tag = "shows"
)]
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateShowInput>,
) -> AppResult<Json<Show>> {
    input.validate()?;

    let show = sqlx::query_as::<_, Show>(
        r#"
        INSERT INTO shows (id, location, start_date, end_date, show_type, season)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.location)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(input.show_type)
    .bind(input.season)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(show))
}

/// GET /api/shows/{id}
#[utoipa::path(
    get,
    path = "/api/shows/{id}",
    params(("id" = Uuid, Path, description = "Show id")),
    responses(
        (status = 200, description = "Show", body = Show),
        (status = 404, description = "Show not found")
    ),
    tag = "shows"
)]
pub async fn get_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Show>> {
    let show = sqlx::query_as::<_, Show>("SELECT * FROM shows WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Show {} not found", id)))?;

    Ok(Json(show))
}

/// DELETE /api/shows/{id} - bookings referencing the show keep their copy of
/// the date range; their show reference degrades to null on read.
#[utoipa::path(
    delete,
    path = "/api/shows/{id}",
    params(("id" = Uuid, Path, description = "Show id")),
    responses(
        (status = 200, description = "Show deleted", body = ShowMutationResponse),
        (status = 404, description = "Show not found")
    ),
    tag = "shows"
)]
pub async fn delete_show(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ShowMutationResponse>> {
    let result = sqlx::query("DELETE FROM shows WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Show {} not found", id)));
    }

    Ok(Json(ShowMutationResponse {
        success: true,
        message: Some("Show deleted successfully".to_string()),
    }))
}
