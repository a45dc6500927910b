use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use sqlx::types::Json as SqlJson;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    models::{
        AssignSlotInput, Booking, BookingMutationResponse, BookingView, Client,
        CreateBookingInput, DayView, SetHeadcountInput, Show, StaffRef, UpdateBookingInput,
    },
    staffing::{self, DayEntry},
    views::{self, BookingFilter, GroupedBookings},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct GetBookingsQuery {
    /// Case-insensitive substring match on client company name, assigned
    /// staff names, or notes.
    pub search: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "showType")]
    pub show_type: Option<String>,
}

impl GetBookingsQuery {
    fn into_filter(self) -> AppResult<BookingFilter> {
        Ok(BookingFilter {
            search: self.search,
            status: views::parse_filter_param(self.status.as_deref(), "status")?,
            location: views::parse_filter_param(self.location.as_deref(), "location")?,
            show_type: views::parse_filter_param(self.show_type.as_deref(), "showType")?,
        })
    }
}

/// GET /api/bookings?search=&status=&location=&showType=
#[utoipa::path(
    get,
    path = "/api/bookings",
    params(GetBookingsQuery),
    responses(
        (status = 200, description = "Populated bookings, newest first, optionally filtered", body = Vec<BookingView>),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "bookings"
)]
pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetBookingsQuery>,
) -> AppResult<Json<Vec<BookingView>>> {
    let filter = query.into_filter()?;
    let views = fetch_populated_bookings(&state.db).await?;
    Ok(Json(views::filter_bookings(views, &filter)))
}

/// GET /api/bookings/grouped - same filters, partitioned by status in display
/// order, with the staffing coverage totals for the filtered set.
#[utoipa::path(
    get,
    path = "/api/bookings/grouped",
    params(GetBookingsQuery),
    responses(
        (status = 200, description = "Filtered bookings grouped by status, plus coverage totals", body = GroupedBookings),
        (status = 400, description = "Invalid filter value")
    ),
    tag = "bookings"
)]
pub async fn get_bookings_grouped(
    State(state): State<Arc<AppState>>,
    Query(query): Query<GetBookingsQuery>,
) -> AppResult<Json<GroupedBookings>> {
    let filter = query.into_filter()?;
    let views = fetch_populated_bookings(&state.db).await?;
    let filtered = views::filter_bookings(views, &filter);

    let totals = views::staffing_totals(&filtered);
    Ok(Json(GroupedBookings {
        groups: views::group_by_status(filtered),
        totals,
    }))
}

/// POST /api/bookings - when no daily staffing is supplied the plan is
/// expanded from the date range.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingInput,
    responses(
        (status = 200, description = "Booking created, populated for display", body = BookingView),
        (status = 422, description = "Missing or malformed fields")
    ),
    tag = "bookings"
)]
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateBookingInput>,
) -> AppResult<Json<BookingView>> {
    input.validate()?;

    let daily_staffing = if input.daily_staffing.is_empty() {
        staffing::expand_range(input.start_date, input.end_date)?
    } else {
        input.daily_staffing
    };

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        INSERT INTO bookings (id, show_id, client_id, start_date, end_date, daily_staffing, notes, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.show_id)
    .bind(input.client_id)
    .bind(input.start_date)
    .bind(input.end_date)
    .bind(SqlJson(&daily_staffing))
    .bind(&input.notes)
    .bind(input.status.unwrap_or_default())
    .fetch_one(&state.db)
    .await?;

    let view = populate_booking(&state.db, booking).await?;
    Ok(Json(view))
}

/// GET /api/bookings/{id}
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Populated booking", body = BookingView),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings"
)]
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingView>> {
    let booking = fetch_booking(&state.db, id).await?;
    let view = populate_booking(&state.db, booking).await?;
    Ok(Json(view))
}

/// PUT /api/bookings/{id} - changing the date range without an accompanying
/// dailyStaffing payload regenerates the plan from the new range, discarding
/// assignments. The response carries the regenerated plan so the caller can
/// see what was lost.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = UpdateBookingInput,
    responses(
        (status = 200, description = "Booking updated, populated for display", body = BookingView),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Malformed fields")
    ),
    tag = "bookings"
)]
pub async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBookingInput>,
) -> AppResult<Json<BookingView>> {
    input.validate()?;
    if input.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let existing = fetch_booking(&state.db, id).await?;

    let start_date = input.start_date.unwrap_or(existing.start_date);
    let end_date = input.end_date.unwrap_or(existing.end_date);
    if end_date < start_date {
        return Err(AppError::Validation(vec![crate::error::FieldError::new(
            "endDate",
            "End date must be after start date",
        )]));
    }

    let range_changed = start_date != existing.start_date || end_date != existing.end_date;
    let daily_staffing = match input.daily_staffing {
        Some(days) => days,
        None if range_changed => {
            tracing::debug!(booking_id = %id, "Date range changed; regenerating staffing plan");
            staffing::expand_range(start_date, end_date)?
        }
        None => existing.daily_staffing.0,
    };

    let booking = sqlx::query_as::<_, Booking>(
        r#"
        UPDATE bookings
        SET show_id = $1, client_id = $2, start_date = $3, end_date = $4,
            daily_staffing = $5, notes = $6, status = $7
        WHERE id = $8
        RETURNING *
        "#,
    )
    .bind(input.show_id.unwrap_or(existing.show_id))
    .bind(input.client_id.unwrap_or(existing.client_id))
    .bind(start_date)
    .bind(end_date)
    .bind(SqlJson(&daily_staffing))
    .bind(input.notes.or(existing.notes))
    .bind(input.status.unwrap_or(existing.status))
    .bind(id)
    .fetch_one(&state.db)
    .await?;

    let view = populate_booking(&state.db, booking).await?;
    Ok(Json(view))
}

/// DELETE /api/bookings/{id}
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking deleted", body = BookingMutationResponse),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings"
)]
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingMutationResponse>> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Booking {} not found", id)));
    }

    Ok(Json(BookingMutationResponse {
        success: true,
        message: Some("Booking deleted successfully".to_string()),
    }))
}

/// PUT /api/bookings/{id}/days/{index}/headcount - destructive resize: the
/// day's slots are reset to `count` empty slots.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/days/{index}/headcount",
    params(
        ("id" = Uuid, Path, description = "Booking id"),
        ("index" = usize, Path, description = "Day index, 0-based")
    ),
    request_body = SetHeadcountInput,
    responses(
        (status = 200, description = "Updated staffing plan", body = Vec<DayEntry>),
        (status = 400, description = "Day index out of range"),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings"
)]
pub async fn set_day_headcount(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(input): Json<SetHeadcountInput>,
) -> AppResult<Json<Vec<DayEntry>>> {
    mutate_plan(&state.db, id, |days| {
        staffing::set_headcount(days, index, input.count)
    })
    .await
}

/// PUT /api/bookings/{id}/days/headcount - set every day at once.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/days/headcount",
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = SetHeadcountInput,
    responses(
        (status = 200, description = "Updated staffing plan", body = Vec<DayEntry>),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings"
)]
pub async fn set_all_headcounts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<SetHeadcountInput>,
) -> AppResult<Json<Vec<DayEntry>>> {
    mutate_plan(&state.db, id, |days| {
        staffing::set_all_days(days, input.count);
        Ok(())
    })
    .await
}

/// PUT /api/bookings/{id}/days/{index}/slots/{slot} - assign or clear one
/// slot.
#[utoipa::path(
    put,
    path = "/api/bookings/{id}/days/{index}/slots/{slot}",
    params(
        ("id" = Uuid, Path, description = "Booking id"),
        ("index" = usize, Path, description = "Day index, 0-based"),
        ("slot" = usize, Path, description = "Slot index, 0-based")
    ),
    request_body = AssignSlotInput,
    responses(
        (status = 200, description = "Updated staffing plan", body = Vec<DayEntry>),
        (status = 400, description = "Day or slot index out of range"),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings"
)]
pub async fn assign_day_slot(
    State(state): State<Arc<AppState>>,
    Path((id, index, slot)): Path<(Uuid, usize, usize)>,
    Json(input): Json<AssignSlotInput>,
) -> AppResult<Json<Vec<DayEntry>>> {
    mutate_plan(&state.db, id, |days| {
        staffing::assign_slot(days, index, slot, input.staff_id)
    })
    .await
}

/// POST /api/bookings/{id}/days/{index}/copy-previous
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/days/{index}/copy-previous",
    params(
        ("id" = Uuid, Path, description = "Booking id"),
        ("index" = usize, Path, description = "Day index, 0-based")
    ),
    responses(
        (status = 200, description = "Updated staffing plan", body = Vec<DayEntry>),
        (status = 400, description = "Day index out of range"),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings"
)]
pub async fn copy_previous_day(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AppResult<Json<Vec<DayEntry>>> {
    mutate_plan(&state.db, id, |days| staffing::copy_from_previous(days, index)).await
}

/// POST /api/bookings/{id}/days/{index}/auto-fill - fill the day's empty
/// slots from the roster (staff sorted by name), skipping staff already on
/// that day. Not availability-checked against other bookings.
#[utoipa::path(
    post,
    path = "/api/bookings/{id}/days/{index}/auto-fill",
    params(
        ("id" = Uuid, Path, description = "Booking id"),
        ("index" = usize, Path, description = "Day index, 0-based")
    ),
    responses(
        (status = 200, description = "Updated staffing plan", body = Vec<DayEntry>),
        (status = 400, description = "Day index out of range"),
        (status = 404, description = "Booking not found")
    ),
    tag = "bookings"
)]
pub async fn auto_fill_day(
    State(state): State<Arc<AppState>>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> AppResult<Json<Vec<DayEntry>>> {
    let roster = super::staff_handler::staff_roster(&state.db).await?;
    mutate_plan(&state.db, id, |days| {
        staffing::auto_fill(days, index, &roster)
    })
    .await
}

/// Load a booking's plan, apply one builder operation, persist, and return
/// the updated plan. Last write wins on concurrent edits.
async fn mutate_plan<F>(db: &sqlx::PgPool, id: Uuid, op: F) -> AppResult<Json<Vec<DayEntry>>>
where
    F: FnOnce(&mut Vec<DayEntry>) -> Result<(), staffing::StaffingError>,
{
    let booking = fetch_booking(db, id).await?;
    let mut days = booking.daily_staffing.0;

    op(&mut days)?;

    sqlx::query("UPDATE bookings SET daily_staffing = $1 WHERE id = $2")
        .bind(SqlJson(&days))
        .bind(id)
        .execute(db)
        .await?;

    Ok(Json(days))
}

async fn fetch_booking(db: &sqlx::PgPool, id: Uuid) -> AppResult<Booking> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
}

async fn fetch_populated_bookings(db: &sqlx::PgPool) -> AppResult<Vec<BookingView>> {
    let bookings =
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings ORDER BY created_at DESC")
            .fetch_all(db)
            .await?;

    populate_bookings(db, bookings).await
}

async fn populate_booking(db: &sqlx::PgPool, booking: Booking) -> AppResult<BookingView> {
    let mut views = populate_bookings(db, vec![booking]).await?;
    views
        .pop()
        .ok_or_else(|| AppError::Internal("populate dropped a booking".to_string()))
}

/// Resolve show, client, and staff references for a batch of bookings with
/// one query per referenced table.
async fn populate_bookings(
    db: &sqlx::PgPool,
    bookings: Vec<Booking>,
) -> AppResult<Vec<BookingView>> {
    let mut show_ids = Vec::new();
    let mut client_ids = Vec::new();
    let mut staff_ids = Vec::new();

    for booking in &bookings {
        show_ids.push(booking.show_id);
        client_ids.push(booking.client_id);
        for day in &booking.daily_staffing.0 {
            staff_ids.extend(day.assigned_staff.iter().flatten().copied());
        }
    }
    show_ids.sort_unstable();
    show_ids.dedup();
    client_ids.sort_unstable();
    client_ids.dedup();
    staff_ids.sort_unstable();
    staff_ids.dedup();

    let shows: HashMap<Uuid, Show> =
        sqlx::query_as::<_, Show>("SELECT * FROM shows WHERE id = ANY($1)")
            .bind(&show_ids)
            .fetch_all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

    let clients: HashMap<Uuid, Client> =
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ANY($1)")
            .bind(&client_ids)
            .fetch_all(db)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

    let staff: HashMap<Uuid, StaffRef> = sqlx::query_as::<_, (Uuid, String, Option<String>)>(
        "SELECT id, name, photo_url FROM staff WHERE id = ANY($1)",
    )
    .bind(&staff_ids)
    .fetch_all(db)
    .await?
    .into_iter()
    .map(|(id, name, photo_url)| {
        (
            id,
            StaffRef {
                id,
                name,
                photo_url,
            },
        )
    })
    .collect();

    Ok(bookings
        .into_iter()
        .map(|b| build_view(b, &shows, &clients, &staff))
        .collect())
}

/// Pure assembly step of populate: dangling staff references degrade to the
/// "Unnamed Staff" placeholder, dangling show/client references to null.
fn build_view(
    booking: Booking,
    shows: &HashMap<Uuid, Show>,
    clients: &HashMap<Uuid, Client>,
    staff: &HashMap<Uuid, StaffRef>,
) -> BookingView {
    let daily_staffing = booking
        .daily_staffing
        .0
        .into_iter()
        .map(|day| DayView {
            date: day.date,
            staff_needed: day.staff_needed,
            assigned_staff: day
                .assigned_staff
                .into_iter()
                .map(|slot| {
                    slot.map(|id| staff.get(&id).cloned().unwrap_or_else(|| StaffRef::unnamed(id)))
                })
                .collect(),
        })
        .collect();

    BookingView {
        id: booking.id,
        show: shows.get(&booking.show_id).cloned(),
        client: clients.get(&booking.client_id).cloned(),
        start_date: booking.start_date,
        end_date: booking.end_date,
        daily_staffing,
        notes: booking.notes,
        status: booking.status,
        created_at: booking.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, UNNAMED_STAFF};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn booking_row(staff_slot: Option<Uuid>) -> Booking {
        let mut days = staffing::expand_range(date("2025-06-01"), date("2025-06-01")).unwrap();
        days[0].assigned_staff[0] = staff_slot;

        Booking {
            id: Uuid::from_u128(1),
            show_id: Uuid::from_u128(2),
            client_id: Uuid::from_u128(3),
            start_date: date("2025-06-01"),
            end_date: date("2025-06-01"),
            daily_staffing: SqlJson(days),
            notes: None,
            status: BookingStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn deleted_staff_degrades_to_unnamed_placeholder() {
        let gone = Uuid::from_u128(99);
        let view = build_view(
            booking_row(Some(gone)),
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        );

        let slot = view.daily_staffing[0].assigned_staff[0]
            .as_ref()
            .expect("slot should stay occupied");
        assert_eq!(slot.name, UNNAMED_STAFF);
        assert_eq!(slot.id, gone);
    }

    #[test]
    fn resolvable_staff_keeps_its_name_and_empty_slots_stay_null() {
        let present = Uuid::from_u128(50);
        let mut staff = HashMap::new();
        staff.insert(
            present,
            StaffRef {
                id: present,
                name: "Dana Reeves".to_string(),
                photo_url: None,
            },
        );

        let resolved = build_view(
            booking_row(Some(present)),
            &HashMap::new(),
            &HashMap::new(),
            &staff,
        );
        assert_eq!(
            resolved.daily_staffing[0].assigned_staff[0]
                .as_ref()
                .unwrap()
                .name,
            "Dana Reeves"
        );

        let empty = build_view(booking_row(None), &HashMap::new(), &HashMap::new(), &staff);
        assert!(empty.daily_staffing[0].assigned_staff[0].is_none());
    }

    #[test]
    fn dangling_show_and_client_become_null_not_errors() {
        let view = build_view(
            booking_row(None),
            &HashMap::new(),
            &HashMap::new(),
            &HashMap::new(),
        );
        assert!(view.show.is_none());
        assert!(view.client.is_none());
    }
}
