//! The fixed half-hour booking grid.
//!
//! Every appointment occupies exactly one slot. Slots start at 08:00 and the
//! last one starts at 20:00; there is no duration modelling beyond that.

use chrono::{NaiveTime, Timelike};

use crate::error::CoreError;
use crate::types::Time;

/// Width of one slot in minutes.
pub const SLOT_MINUTES: u32 = 30;

/// Hour of the first slot of the day.
pub const FIRST_SLOT_HOUR: u32 = 8;

/// Hour of the last slot of the day (inclusive, on the hour).
pub const LAST_SLOT_HOUR: u32 = 20;

/// Wire format for slot times (`"08:30"`).
pub const SLOT_FORMAT: &str = "%H:%M";

/// All slots of a day in chronological order (08:00, 08:30, ..., 20:00).
pub fn all_slots() -> Vec<Time> {
    let mut slots = Vec::new();
    let mut minutes = FIRST_SLOT_HOUR * 60;
    while minutes <= LAST_SLOT_HOUR * 60 {
        if let Some(t) = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0) {
            slots.push(t);
        }
        minutes += SLOT_MINUTES;
    }
    slots
}

/// Whether `time` starts a cell of the booking grid.
pub fn is_grid_slot(time: Time) -> bool {
    let minutes = time.hour() * 60 + time.minute();
    time.second() == 0
        && time.nanosecond() == 0
        && minutes % SLOT_MINUTES == 0
        && (FIRST_SLOT_HOUR * 60..=LAST_SLOT_HOUR * 60).contains(&minutes)
}

/// Reject times that are not on the grid.
pub fn validate_slot(time: Time) -> Result<(), CoreError> {
    if is_grid_slot(time) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Time {} is not a booking slot (every {SLOT_MINUTES} minutes from \
             {FIRST_SLOT_HOUR:02}:00 to {LAST_SLOT_HOUR:02}:00)",
            format_slot(time)
        )))
    }
}

/// Parse `"HH:MM"` (or `"HH:MM:SS"`) into a grid slot.
pub fn parse_slot(value: &str) -> Result<Time, CoreError> {
    let trimmed = value.trim();
    let time = NaiveTime::parse_from_str(trimmed, SLOT_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| CoreError::Validation(format!("Invalid time '{value}', expected HH:MM")))?;
    validate_slot(time)?;
    Ok(time)
}

/// Render a slot as `"HH:MM"`.
pub fn format_slot(time: Time) -> String {
    time.format(SLOT_FORMAT).to_string()
}

/// Serde adapter storing slot times as `"HH:MM"`.
///
/// Deserialization also accepts `"HH:MM:SS"` so rows written by older
/// exports keep loading.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_slot(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, super::SLOT_FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
