//! Slot conflict detection.
//!
//! Conflicts use exact-match semantics: two appointments collide only when
//! they share the same date and the same grid slot. Only pending
//! appointments block a slot; attended ones are history.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::types::{Date, DbId, Time};

// ---------------------------------------------------------------------------
// Conflict detection
// ---------------------------------------------------------------------------

/// The minimal view of a pending appointment needed to decide slot usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOccupant {
    pub id: DbId,
    pub date: Date,
    pub time: Time,
}

/// Returns `true` if any occupant other than `exclude_id` holds the slot.
///
/// `exclude_id` is `None` when booking a new appointment and the
/// appointment's own id when re-validating an edit.
pub fn has_conflict(
    occupants: &[SlotOccupant],
    date: Date,
    time: Time,
    exclude_id: Option<DbId>,
) -> bool {
    occupants
        .iter()
        .any(|o| o.date == date && o.time == time && Some(o.id) != exclude_id)
}

/// Whether the slot starts before `now`. Callers warn but still save.
pub fn is_in_past(date: Date, time: Time, now: NaiveDateTime) -> bool {
    NaiveDateTime::new(date, time) < now
}

/// Outcome of checking a candidate slot, surfaced to the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SlotCheck {
    /// Another pending appointment already holds the slot.
    pub conflict: bool,
    /// The slot lies before the current wall-clock time.
    pub in_past: bool,
}

impl SlotCheck {
    /// Human-readable warnings for the flags that are set.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.conflict {
            out.push("Another pending appointment is booked for this slot".to_string());
        }
        if self.in_past {
            out.push("The appointment is scheduled in the past".to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn t(h: u32, m: u32) -> Time {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn occ(id: DbId, date: Date, time: Time) -> SlotOccupant {
        SlotOccupant { id, date, time }
    }

    #[test]
    fn empty_schedule_has_no_conflict() {
        assert!(!has_conflict(&[], d(2024, 5, 1), t(9, 0), None));
    }

    #[test]
    fn same_slot_conflicts_for_new_booking() {
        let occupants = [occ(1, d(2024, 5, 1), t(9, 0))];
        assert!(has_conflict(&occupants, d(2024, 5, 1), t(9, 0), None));
    }

    #[test]
    fn editing_self_is_not_a_conflict() {
        let occupants = [occ(1, d(2024, 5, 1), t(9, 0))];
        assert!(!has_conflict(&occupants, d(2024, 5, 1), t(9, 0), Some(1)));
    }

    #[test]
    fn third_booking_on_double_booked_slot_conflicts() {
        let occupants = [occ(1, d(2024, 5, 1), t(9, 0)), occ(2, d(2024, 5, 1), t(9, 0))];
        assert!(has_conflict(&occupants, d(2024, 5, 1), t(9, 0), None));
        // Either member still collides with the other when editing itself.
        assert!(has_conflict(&occupants, d(2024, 5, 1), t(9, 0), Some(1)));
        assert!(has_conflict(&occupants, d(2024, 5, 1), t(9, 0), Some(2)));
    }

    #[test]
    fn adjacent_slots_do_not_conflict() {
        let occupants = [occ(1, d(2024, 5, 1), t(9, 0))];
        assert!(!has_conflict(&occupants, d(2024, 5, 1), t(9, 30), None));
        assert!(!has_conflict(&occupants, d(2024, 5, 2), t(9, 0), None));
    }

    #[test]
    fn past_detection() {
        let now = NaiveDateTime::new(d(2024, 5, 1), t(12, 0));
        assert!(is_in_past(d(2024, 5, 1), t(11, 30), now));
        assert!(!is_in_past(d(2024, 5, 1), t(12, 0), now));
        assert!(!is_in_past(d(2024, 5, 2), t(8, 0), now));
    }

    #[test]
    fn slot_check_warnings() {
        assert!(SlotCheck::default().warnings().is_empty());
        let check = SlotCheck {
            conflict: true,
            in_past: true,
        };
        assert_eq!(check.warnings().len(), 2);
    }
}
