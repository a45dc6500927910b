//! Read-only views over populated bookings: predicate filtering, grouping by
//! status in display order, and the staffing coverage totals. Pure functions;
//! the bookings handler applies them after populating.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{BookingStatus, BookingView, Location, ShowType};
use crate::{AppError, AppResult};

/// Conjunction of booking filters. `None` means "no filter" (the wire-level
/// sentinel `all` parses to `None`).
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
    pub location: Option<Location>,
    pub show_type: Option<ShowType>,
}

/// Parse an enum-valued filter query param, accepting the `all` sentinel (any
/// case) and the absence of the param as "no filter".
pub fn parse_filter_param<T: serde::de::DeserializeOwned>(
    raw: Option<&str>,
    field: &str,
) -> AppResult<Option<T>> {
    match raw {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") || v.is_empty() => Ok(None),
        Some(v) => serde_json::from_value(serde_json::Value::String(v.to_string()))
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {} filter: {}", field, v))),
    }
}

pub fn filter_bookings(mut bookings: Vec<BookingView>, filter: &BookingFilter) -> Vec<BookingView> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    bookings.retain(|booking| {
        let matches_search = match &needle {
            None => true,
            Some(needle) => matches_search_text(booking, needle),
        };

        let matches_status = filter.status.is_none_or(|s| booking.status == s);
        let matches_location = filter
            .location
            .is_none_or(|l| booking.show.as_ref().is_some_and(|s| s.location == l));
        let matches_show_type = filter
            .show_type
            .is_none_or(|t| booking.show.as_ref().is_some_and(|s| s.show_type == t));

        matches_search && matches_status && matches_location && matches_show_type
    });

    bookings
}

/// Case-insensitive substring match against the client company name, any
/// assigned staff member's name on any day, or the booking notes.
fn matches_search_text(booking: &BookingView, needle: &str) -> bool {
    if let Some(client) = &booking.client {
        if client.company_name.to_lowercase().contains(needle) {
            return true;
        }
    }

    let staff_match = booking.daily_staffing.iter().any(|day| {
        day.assigned_staff
            .iter()
            .flatten()
            .any(|staff| staff.name.to_lowercase().contains(needle))
    });
    if staff_match {
        return true;
    }

    booking
        .notes
        .as_deref()
        .is_some_and(|notes| notes.to_lowercase().contains(needle))
}

/// Partition bookings by status. `BookingStatus` orders in display order
/// (Pending, Confirmed, Completed, Cancelled), so the map iterates in that
/// order; statuses with no bookings get no key.
pub fn group_by_status(bookings: Vec<BookingView>) -> BTreeMap<BookingStatus, Vec<BookingView>> {
    let mut groups: BTreeMap<BookingStatus, Vec<BookingView>> = BTreeMap::new();
    for booking in bookings {
        groups.entry(booking.status).or_default().push(booking);
    }
    groups
}

/// Coverage indicator: total required headcount vs. filled slots across every
/// day entry of every booking in the set. Display-only, not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StaffingTotals {
    pub needed: u32,
    pub assigned: u32,
}

pub fn staffing_totals(bookings: &[BookingView]) -> StaffingTotals {
    let mut totals = StaffingTotals {
        needed: 0,
        assigned: 0,
    };

    for booking in bookings {
        for day in &booking.daily_staffing {
            totals.needed += day.staff_needed;
            totals.assigned += day.assigned_staff.iter().flatten().count() as u32;
        }
    }

    totals
}

/// Response for the grouped bookings route.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupedBookings {
    pub groups: BTreeMap<BookingStatus, Vec<BookingView>>,
    pub totals: StaffingTotals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking_view::{DayView, StaffRef};
    use crate::models::{Client, Location, Season, Show, ShowType};
    use chrono::{NaiveDate, TimeZone, Utc};
    use sqlx::types::Json;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn show(location: Location, show_type: ShowType) -> Show {
        Show {
            id: Uuid::from_u128(100),
            location,
            start_date: date("2025-06-01"),
            end_date: date("2025-06-05"),
            show_type,
            season: Season::Summer,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn client(company_name: &str) -> Client {
        Client {
            id: Uuid::from_u128(200),
            company_name: company_name.to_string(),
            category: "Gift".to_string(),
            website: None,
            booth_location: None,
            contacts: Json(vec![]),
            notes: None,
            created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn staff_ref(name: &str) -> StaffRef {
        StaffRef {
            id: Uuid::from_u128(300),
            name: name.to_string(),
            photo_url: None,
        }
    }

    fn booking(
        company_name: &str,
        status: BookingStatus,
        staff_names: &[&str],
        notes: Option<&str>,
    ) -> BookingView {
        BookingView {
            id: Uuid::new_v4(),
            show: Some(show(Location::ATL, ShowType::Gift)),
            client: Some(client(company_name)),
            start_date: date("2025-06-01"),
            end_date: date("2025-06-01"),
            daily_staffing: vec![DayView {
                date: date("2025-06-01"),
                staff_needed: staff_names.len().max(1) as u32,
                assigned_staff: staff_names.iter().map(|n| Some(staff_ref(n))).collect(),
            }],
            notes: notes.map(str::to_string),
            status,
            created_at: Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn search_matches_client_name_case_insensitively() {
        let bookings = vec![
            booking("Acme Corp", BookingStatus::Pending, &[], None),
            booking("Other Co", BookingStatus::Pending, &[], None),
        ];

        let filter = BookingFilter {
            search: Some("acme".to_string()),
            ..Default::default()
        };
        let result = filter_bookings(bookings, &filter);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].client.as_ref().unwrap().company_name, "Acme Corp");
    }

    #[test]
    fn search_matches_assigned_staff_names_and_notes() {
        let bookings = vec![
            booking("Other Co", BookingStatus::Pending, &["Jordan Blake"], None),
            booking("Second Co", BookingStatus::Pending, &[], Some("setup by Acme crew")),
            booking("Third Co", BookingStatus::Pending, &[], None),
        ];

        let by_staff = filter_bookings(
            bookings.clone(),
            &BookingFilter {
                search: Some("jordan".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_staff.len(), 1);

        let by_notes = filter_bookings(
            bookings,
            &BookingFilter {
                search: Some("ACME".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(by_notes.len(), 1);
        assert_eq!(
            by_notes[0].client.as_ref().unwrap().company_name,
            "Second Co"
        );
    }

    #[test]
    fn exact_filters_are_a_conjunction() {
        let mut nyc = booking("Acme Corp", BookingStatus::Confirmed, &[], None);
        nyc.show = Some(show(Location::NYC, ShowType::Apparel));
        let bookings = vec![
            booking("Acme Corp", BookingStatus::Confirmed, &[], None), // ATL/Gift
            nyc,
        ];

        let filter = BookingFilter {
            status: Some(BookingStatus::Confirmed),
            location: Some(Location::NYC),
            show_type: Some(ShowType::Apparel),
            ..Default::default()
        };
        let result = filter_bookings(bookings, &filter);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].show.as_ref().unwrap().location, Location::NYC);
    }

    #[test]
    fn booking_with_dangling_show_never_matches_location_filter() {
        let mut dangling = booking("Acme Corp", BookingStatus::Pending, &[], None);
        dangling.show = None;

        let filter = BookingFilter {
            location: Some(Location::ATL),
            ..Default::default()
        };
        assert!(filter_bookings(vec![dangling], &filter).is_empty());
    }

    #[test]
    fn group_by_status_has_exact_counts_and_no_extra_keys() {
        let bookings = vec![
            booking("A", BookingStatus::Pending, &[], None),
            booking("B", BookingStatus::Pending, &[], None),
            booking("C", BookingStatus::Confirmed, &[], None),
            booking("D", BookingStatus::Cancelled, &[], None),
        ];

        let groups = group_by_status(bookings);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[&BookingStatus::Pending].len(), 2);
        assert_eq!(groups[&BookingStatus::Confirmed].len(), 1);
        assert_eq!(groups[&BookingStatus::Cancelled].len(), 1);
        assert!(!groups.contains_key(&BookingStatus::Completed));

        let order: Vec<_> = groups.keys().copied().collect();
        assert_eq!(
            order,
            vec![
                BookingStatus::Pending,
                BookingStatus::Confirmed,
                BookingStatus::Cancelled
            ]
        );
    }

    #[test]
    fn totals_count_filled_slots_not_slot_capacity() {
        let mut b = booking("Acme Corp", BookingStatus::Pending, &["One", "Two"], None);
        b.daily_staffing[0].staff_needed = 4;
        b.daily_staffing[0].assigned_staff.push(None);
        b.daily_staffing[0].assigned_staff.push(None);

        let totals = staffing_totals(&[b]);
        assert_eq!(totals, StaffingTotals { needed: 4, assigned: 2 });
    }

    #[test]
    fn parse_filter_param_accepts_all_sentinel() {
        let none: Option<BookingStatus> = parse_filter_param(Some("all"), "status").unwrap();
        assert!(none.is_none());
        let none: Option<BookingStatus> = parse_filter_param(Some("All"), "status").unwrap();
        assert!(none.is_none());

        let some: Option<BookingStatus> = parse_filter_param(Some("Pending"), "status").unwrap();
        assert_eq!(some, Some(BookingStatus::Pending));

        let err: AppResult<Option<BookingStatus>> = parse_filter_param(Some("pending?"), "status");
        assert!(err.is_err());
    }
}
