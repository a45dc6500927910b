use axum::{
    extract::{Path, Query, State},
    Json,
};
use moka::future::Cache;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    models::{CreateStaffInput, Location, Staff, StaffMutationResponse, StaffStatus, UpdateStaffInput},
    AppError, AppResult, AppState,
};

// The full roster (ids ordered by name) backs booking auto-fill; cache it
// briefly so a burst of day edits does not re-read the staff table each time.
static ROSTER_CACHE: Lazy<Cache<&'static str, Vec<Uuid>>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(60))
        .build()
});

pub async fn invalidate_roster_cache() {
    ROSTER_CACHE.invalidate(&"all").await;
}

/// Staff ids in roster order (sorted by name), for auto-fill.
pub async fn staff_roster(db: &sqlx::PgPool) -> AppResult<Vec<Uuid>> {
    if let Some(cached) = ROSTER_CACHE.get(&"all").await {
        return Ok(cached);
    }

    let ids: Vec<Uuid> = sqlx::query_scalar("SELECT id FROM staff ORDER BY name")
        .fetch_all(db)
        .await?;

    ROSTER_CACHE.insert("all", ids.clone()).await;
    Ok(ids)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetStaffQuery {
    /// Case-insensitive substring match on name or email.
    pub search: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
}

/// GET /api/staff?search=&location=&status=
#[utoipa::path(
    get,
    path = "/api/staff",
    params(GetStaffQuery),
    responses(
        (status = 200, description = "Staff roster sorted by name, optionally filtered", body = Vec<Staff>),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "staff"
)]
pub async fn get_staff_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetStaffQuery>,
) -> AppResult<Json<Vec<Staff>>> {
    let location: Option<Location> =
        crate::views::parse_filter_param(query.location.as_deref(), "location")?;
    let status: Option<StaffStatus> =
        crate::views::parse_filter_param(query.status.as_deref(), "status")?;

    let mut sql = "SELECT * FROM staff WHERE 1=1".to_string();
    let mut bind_count = 0;

    let search_pattern = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s));

    if search_pattern.is_some() {
        bind_count += 1;
        sql.push_str(&format!(
            " AND (name ILIKE ${n} OR email ILIKE ${n})",
            n = bind_count
        ));
    }
    if location.is_some() {
        bind_count += 1;
        sql.push_str(&format!(" AND ${} = ANY(locations)", bind_count));
    }
    if status.is_some() {
        bind_count += 1;
        sql.push_str(&format!(" AND status = ${}", bind_count));
    }

    sql.push_str(" ORDER BY name");

    let mut query_builder = sqlx::query_as::<_, Staff>(&sql);
    if let Some(pattern) = &search_pattern {
        query_builder = query_builder.bind(pattern);
    }
    if let Some(location) = location {
        query_builder = query_builder.bind(location);
    }
    if let Some(status) = status {
        query_builder = query_builder.bind(status);
    }

    let staff = query_builder.fetch_all(&state.db).await?;
    Ok(Json(staff))
}

/// POST /api/staff
#[utoipa::path(
    post,
    path = "/api/staff",
    request_body = CreateStaffInput,
    responses(
        (status = 200, description = "Staff member created", body = Staff),
        (status = 409, description = "Email already in use"),
        (status = 422, description = "Missing or malformed fields")
    ),
    tag = "staff"
)]
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateStaffInput>,
) -> AppResult<Json<Staff>> {
    input.validate()?;

    let staff = sqlx::query_as::<_, Staff>(
        r#"
        INSERT INTO staff (
            id, name, email, phone, locations, birthday, college,
            shoe_size, dress_size, photo_url, resume_url,
            days_worked, status, notes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.name.trim())
    .bind(input.email.trim())
    .bind(&input.phone)
    .bind(&input.locations)
    .bind(input.birthday)
    .bind(&input.college)
    .bind(&input.shoe_size)
    .bind(&input.dress_size)
    .bind(&input.photo_url)
    .bind(&input.resume_url)
    .bind(input.days_worked.unwrap_or(0))
    .bind(input.status.unwrap_or_default())
    .bind(&input.notes)
    .fetch_one(&state.db)
    .await?;

    invalidate_roster_cache().await;
    Ok(Json(staff))
}

/// GET /api/staff/{id}
#[utoipa::path(
    get,
    path = "/api/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff id")),
    responses(
        (status = 200, description = "Staff member", body = Staff),
        (status = 404, description = "Staff member not found")
    ),
    tag = "staff"
)]
pub async fn get_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Staff>> {
    let staff = sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Staff member {} not found", id)))?;

    Ok(Json(staff))
}

/// PUT /api/staff/{id}
#[utoipa::path(
    put,
    path = "/api/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff id")),
    request_body = UpdateStaffInput,
    responses(
        (status = 200, description = "Staff member updated", body = Staff),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Staff member not found"),
        (status = 422, description = "Malformed fields")
    ),
    tag = "staff"
)]
pub async fn update_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateStaffInput>,
) -> AppResult<Json<Staff>> {
    input.validate()?;

    let staff = apply_staff_update(&state.db, id, &input).await?;
    invalidate_roster_cache().await;
    Ok(Json(staff))
}

/// Field-by-field partial update. Shared with the assistant's
/// `updateStaffMember` tool.
pub async fn apply_staff_update(
    db: &sqlx::PgPool,
    id: Uuid,
    input: &UpdateStaffInput,
) -> AppResult<Staff> {
    let mut updates = vec![];
    let mut bind_count = 1;

    if input.name.is_some() {
        updates.push(format!("name = ${}", bind_count));
        bind_count += 1;
    }
    if input.email.is_some() {
        updates.push(format!("email = ${}", bind_count));
        bind_count += 1;
    }
    if input.phone.is_some() {
        updates.push(format!("phone = ${}", bind_count));
        bind_count += 1;
    }
    if input.locations.is_some() {
        updates.push(format!("locations = ${}", bind_count));
        bind_count += 1;
    }
    if input.birthday.is_some() {
        updates.push(format!("birthday = ${}", bind_count));
        bind_count += 1;
    }
    if input.college.is_some() {
        updates.push(format!("college = ${}", bind_count));
        bind_count += 1;
    }
    if input.shoe_size.is_some() {
        updates.push(format!("shoe_size = ${}", bind_count));
        bind_count += 1;
    }
    if input.dress_size.is_some() {
        updates.push(format!("dress_size = ${}", bind_count));
        bind_count += 1;
    }
    if input.photo_url.is_some() {
        updates.push(format!("photo_url = ${}", bind_count));
        bind_count += 1;
    }
    if input.resume_url.is_some() {
        updates.push(format!("resume_url = ${}", bind_count));
        bind_count += 1;
    }
    if input.days_worked.is_some() {
        updates.push(format!("days_worked = ${}", bind_count));
        bind_count += 1;
    }
    if input.status.is_some() {
        updates.push(format!("status = ${}", bind_count));
        bind_count += 1;
    }
    if input.notes.is_some() {
        updates.push(format!("notes = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    updates.push("updated_at = now()".to_string());

    let sql = format!(
        "UPDATE staff SET {} WHERE id = ${} RETURNING *",
        updates.join(", "),
        bind_count
    );

    let mut query = sqlx::query_as::<_, Staff>(&sql);

    if let Some(name) = &input.name {
        query = query.bind(name.trim().to_string());
    }
    if let Some(email) = &input.email {
        query = query.bind(email.trim().to_string());
    }
    if let Some(phone) = &input.phone {
        query = query.bind(phone);
    }
    if let Some(locations) = &input.locations {
        query = query.bind(locations);
    }
    if let Some(birthday) = input.birthday {
        query = query.bind(birthday);
    }
    if let Some(college) = &input.college {
        query = query.bind(college);
    }
    if let Some(shoe_size) = &input.shoe_size {
        query = query.bind(shoe_size);
    }
    if let Some(dress_size) = &input.dress_size {
        query = query.bind(dress_size);
    }
    if let Some(photo_url) = &input.photo_url {
        query = query.bind(photo_url);
    }
    if let Some(resume_url) = &input.resume_url {
        query = query.bind(resume_url);
    }
    if let Some(days_worked) = input.days_worked {
        query = query.bind(days_worked);
    }
    if let Some(status) = input.status {
        query = query.bind(status);
    }
    if let Some(notes) = &input.notes {
        query = query.bind(notes);
    }

    query = query.bind(id);

    query
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Staff member {} not found", id)))
}

/// DELETE /api/staff/{id} - also attempts to remove the staff member's photo
/// and resume blobs. Blob failures are logged and swallowed; the deletion
/// stands either way.
#[utoipa::path(
    delete,
    path = "/api/staff/{id}",
    params(("id" = Uuid, Path, description = "Staff id")),
    responses(
        (status = 200, description = "Staff member deleted", body = StaffMutationResponse),
        (status = 404, description = "Staff member not found")
    ),
    tag = "staff"
)]
pub async fn delete_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<StaffMutationResponse>> {
    let deleted = sqlx::query_as::<_, (Option<String>, Option<String>)>(
        "DELETE FROM staff WHERE id = $1 RETURNING photo_url, resume_url",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Staff member {} not found", id)))?;

    invalidate_roster_cache().await;

    // Best-effort compensating cleanup, not a transaction.
    for url in [deleted.0, deleted.1].into_iter().flatten() {
        if let Err(e) = state.blob.delete(&url).await {
            tracing::warn!(error = %e, url, staff_id = %id, "Failed to delete blob for removed staff member");
        }
    }

    Ok(Json(StaffMutationResponse {
        success: true,
        message: Some("Staff member deleted successfully".to_string()),
    }))
}
