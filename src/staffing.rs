//! Daily staffing plan for a booking: one entry per calendar day in the
//! booking's range, each with a required headcount and a fixed-size list of
//! assignment slots. All operations here are pure; handlers load a booking's
//! plan, apply one operation, and persist the result.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::AppError;

/// One day of a booking's staffing plan. The slot list is kept exactly
/// `staff_needed` long by every operation in this module; an unfilled slot is
/// `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    pub date: NaiveDate,
    pub staff_needed: u32,
    pub assigned_staff: Vec<Option<Uuid>>,
}

impl DayEntry {
    fn open(date: NaiveDate, staff_needed: u32) -> Self {
        Self {
            date,
            staff_needed,
            assigned_staff: vec![None; staff_needed as usize],
        }
    }

    /// Number of slots with a staff member in them.
    pub fn assigned_count(&self) -> u32 {
        self.assigned_staff.iter().filter(|s| s.is_some()).count() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StaffingError {
    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("day index {index} is out of range (plan has {len} days)")]
    DayOutOfRange { index: usize, len: usize },

    #[error("slot index {slot} is out of range (day has {slots} slots)")]
    SlotOutOfRange { slot: usize, slots: usize },
}

impl From<StaffingError> for AppError {
    fn from(err: StaffingError) -> Self {
        match err {
            StaffingError::InvalidRange { .. } => AppError::Validation(vec![
                crate::error::FieldError::new("endDate", err.to_string()),
            ]),
            _ => AppError::BadRequest(err.to_string()),
        }
    }
}

/// Expand an inclusive date range into a fresh plan: one entry per day, one
/// staff member needed, no assignments. Called whenever a booking's range is
/// set or changed; the previous plan (and its assignments) is discarded.
pub fn expand_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<DayEntry>, StaffingError> {
    if start > end {
        return Err(StaffingError::InvalidRange { start, end });
    }

    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        days.push(DayEntry::open(current, 1));
        // Adding one day to a valid NaiveDate in this range cannot overflow.
        current = current
            .checked_add_days(Days::new(1))
            .expect("date overflow while expanding booking range");
    }

    Ok(days)
}

/// Set a day's required headcount. Counts below 1 are clamped to 1. This is a
/// destructive resize: the slot list is reset to `count` empty slots and any
/// prior assignments on that day are discarded.
pub fn set_headcount(
    days: &mut [DayEntry],
    index: usize,
    count: u32,
) -> Result<(), StaffingError> {
    let len = days.len();
    let day = days
        .get_mut(index)
        .ok_or(StaffingError::DayOutOfRange { index, len })?;

    let count = count.max(1);
    day.staff_needed = count;
    day.assigned_staff = vec![None; count as usize];

    Ok(())
}

/// Apply [`set_headcount`]'s reset semantics to every day uniformly.
pub fn set_all_days(days: &mut [DayEntry], count: u32) {
    let count = count.max(1);
    for day in days.iter_mut() {
        day.staff_needed = count;
        day.assigned_staff = vec![None; count as usize];
    }
}

/// Assign (or clear, with `None`) a single slot on a day, leaving the other
/// slots untouched. No check prevents the same staff id occupying two slots
/// on the same day.
pub fn assign_slot(
    days: &mut [DayEntry],
    index: usize,
    slot: usize,
    staff: Option<Uuid>,
) -> Result<(), StaffingError> {
    let len = days.len();
    let day = days
        .get_mut(index)
        .ok_or(StaffingError::DayOutOfRange { index, len })?;

    let slots = day.assigned_staff.len();
    let entry = day
        .assigned_staff
        .get_mut(slot)
        .ok_or(StaffingError::SlotOutOfRange { slot, slots })?;

    *entry = staff;
    Ok(())
}

/// Copy the previous day's headcount and assignments verbatim onto `index`.
/// A no-op on the first day.
pub fn copy_from_previous(days: &mut [DayEntry], index: usize) -> Result<(), StaffingError> {
    if index == 0 {
        return Ok(());
    }

    let len = days.len();
    if index >= len {
        return Err(StaffingError::DayOutOfRange { index, len });
    }

    let previous = days[index - 1].clone();
    days[index].staff_needed = previous.staff_needed;
    days[index].assigned_staff = previous.assigned_staff;

    Ok(())
}

/// Fill a day's empty slots from the roster, in roster order, skipping staff
/// already assigned on that day. Filled slots are left alone; the roster is
/// the full staff list sorted by name, not availability-checked against other
/// bookings.
pub fn auto_fill(
    days: &mut [DayEntry],
    index: usize,
    roster: &[Uuid],
) -> Result<(), StaffingError> {
    let len = days.len();
    let day = days
        .get_mut(index)
        .ok_or(StaffingError::DayOutOfRange { index, len })?;

    let available: Vec<Uuid> = roster
        .iter()
        .copied()
        .filter(|id| !day.assigned_staff.contains(&Some(*id)))
        .collect();
    let mut candidates = available.into_iter();

    for slot in day.assigned_staff.iter_mut() {
        if slot.is_none() {
            match candidates.next() {
                Some(id) => *slot = Some(id),
                None => break,
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn id(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[test]
    fn expand_produces_one_entry_per_day_inclusive() {
        let days = expand_range(date("2025-01-10"), date("2025-01-14")).unwrap();

        assert_eq!(days.len(), 5);
        for (i, day) in days.iter().enumerate() {
            assert_eq!(day.date, date("2025-01-10") + Days::new(i as u64));
            assert_eq!(day.staff_needed, 1);
            assert_eq!(day.assigned_staff, vec![None]);
        }
    }

    #[test]
    fn expand_single_day_range() {
        let days = expand_range(date("2025-03-01"), date("2025-03-01")).unwrap();
        assert_eq!(days.len(), 1);
    }

    #[test]
    fn expand_crosses_month_boundary_without_gaps() {
        let days = expand_range(date("2025-01-30"), date("2025-02-02")).unwrap();
        let dates: Vec<_> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2025-01-30", "2025-01-31", "2025-02-01", "2025-02-02"]);
    }

    #[test]
    fn expand_rejects_inverted_range() {
        let err = expand_range(date("2025-01-14"), date("2025-01-10")).unwrap_err();
        assert!(matches!(err, StaffingError::InvalidRange { .. }));
    }

    #[test]
    fn set_headcount_resets_slots_to_exact_count() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-11")).unwrap();
        assign_slot(&mut days, 0, 0, Some(id(1))).unwrap();

        set_headcount(&mut days, 0, 3).unwrap();
        assert_eq!(days[0].staff_needed, 3);
        // Destructive resize: the prior assignment is gone.
        assert_eq!(days[0].assigned_staff, vec![None, None, None]);

        // Shrinking also resets, not truncates.
        assign_slot(&mut days, 0, 2, Some(id(2))).unwrap();
        set_headcount(&mut days, 0, 2).unwrap();
        assert_eq!(days[0].assigned_staff, vec![None, None]);
    }

    #[test]
    fn set_headcount_clamps_below_one() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-10")).unwrap();
        set_headcount(&mut days, 0, 0).unwrap();
        assert_eq!(days[0].staff_needed, 1);
        assert_eq!(days[0].assigned_staff.len(), 1);
    }

    #[test]
    fn set_headcount_rejects_bad_day_index() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-11")).unwrap();
        let err = set_headcount(&mut days, 2, 2).unwrap_err();
        assert_eq!(err, StaffingError::DayOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn set_all_days_is_uniform() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-12")).unwrap();
        assign_slot(&mut days, 1, 0, Some(id(7))).unwrap();

        set_all_days(&mut days, 4);
        for day in &days {
            assert_eq!(day.staff_needed, 4);
            assert_eq!(day.assigned_staff, vec![None; 4]);
        }
    }

    #[test]
    fn assign_slot_leaves_other_slots_untouched() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-10")).unwrap();
        set_headcount(&mut days, 0, 3).unwrap();

        assign_slot(&mut days, 0, 1, Some(id(5))).unwrap();
        assert_eq!(days[0].assigned_staff, vec![None, Some(id(5)), None]);

        // Clearing a slot.
        assign_slot(&mut days, 0, 1, None).unwrap();
        assert_eq!(days[0].assigned_staff, vec![None, None, None]);
    }

    #[test]
    fn assign_slot_rejects_bad_slot_index() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-10")).unwrap();
        let err = assign_slot(&mut days, 0, 3, Some(id(1))).unwrap_err();
        assert_eq!(err, StaffingError::SlotOutOfRange { slot: 3, slots: 1 });
    }

    #[test]
    fn copy_from_previous_copies_headcount_and_assignments() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-11")).unwrap();
        set_headcount(&mut days, 0, 2).unwrap();
        assign_slot(&mut days, 0, 0, Some(id(1))).unwrap();
        assign_slot(&mut days, 0, 1, Some(id(2))).unwrap();

        copy_from_previous(&mut days, 1).unwrap();
        assert_eq!(days[1].staff_needed, 2);
        assert_eq!(days[1].assigned_staff, vec![Some(id(1)), Some(id(2))]);
        // The date is the copied day's own date.
        assert_eq!(days[1].date, date("2025-01-11"));
    }

    #[test]
    fn copy_from_previous_on_first_day_is_a_noop() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-11")).unwrap();
        let before = days.clone();
        copy_from_previous(&mut days, 0).unwrap();
        assert_eq!(days, before);
    }

    #[test]
    fn copy_from_previous_rejects_index_past_the_end() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-11")).unwrap();
        let err = copy_from_previous(&mut days, 2).unwrap_err();
        assert_eq!(err, StaffingError::DayOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn auto_fill_fills_only_empty_slots_in_roster_order() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-10")).unwrap();
        set_headcount(&mut days, 0, 3).unwrap();
        assign_slot(&mut days, 0, 1, Some(id(20))).unwrap();

        let roster = [id(10), id(20), id(30), id(40)];
        auto_fill(&mut days, 0, &roster).unwrap();

        // id(20) is already assigned and must not be picked again; the two
        // empty slots take the first remaining roster entries in order.
        assert_eq!(
            days[0].assigned_staff,
            vec![Some(id(10)), Some(id(20)), Some(id(30))]
        );
    }

    #[test]
    fn auto_fill_never_duplicates_within_a_day() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-10")).unwrap();
        set_headcount(&mut days, 0, 4).unwrap();

        let roster = [id(1), id(2)];
        auto_fill(&mut days, 0, &roster).unwrap();

        let filled: Vec<_> = days[0].assigned_staff.iter().flatten().collect();
        assert_eq!(filled, vec![&id(1), &id(2)]);
        // Roster exhausted: remaining slots stay open rather than repeating.
        assert_eq!(days[0].assigned_count(), 2);
        assert_eq!(days[0].assigned_staff.len(), 4);
    }

    #[test]
    fn auto_fill_with_full_day_changes_nothing() {
        let mut days = expand_range(date("2025-01-10"), date("2025-01-10")).unwrap();
        assign_slot(&mut days, 0, 0, Some(id(9))).unwrap();
        let before = days.clone();

        auto_fill(&mut days, 0, &[id(1), id(2)]).unwrap();
        assert_eq!(days, before);
    }

    #[test]
    fn day_entry_wire_format_is_camel_case() {
        let days = expand_range(date("2025-01-10"), date("2025-01-10")).unwrap();
        let json = serde_json::to_value(&days[0]).unwrap();
        assert_eq!(json["staffNeeded"], 1);
        assert!(json["assignedStaff"].is_array());
    }
}
