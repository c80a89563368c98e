//! Shared query parameter types for API handlers.

use agenda_core::types::{Date, DbId};
use serde::Deserialize;

/// `?activity_field_id=` on service listings.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityFieldParams {
    pub activity_field_id: Option<DbId>,
}

/// `?detach_appointments=` on service deletion.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteServiceParams {
    #[serde(default)]
    pub detach_appointments: bool,
}

/// `?date=&time=&exclude_id=` on the slot check.
#[derive(Debug, Deserialize)]
pub struct SlotParams {
    pub date: Date,
    pub time: String,
    pub exclude_id: Option<DbId>,
}

/// `?backfill=` on finalize. Absent means the server default.
#[derive(Debug, Default, Deserialize)]
pub struct FinalizeParams {
    pub backfill: Option<bool>,
}

/// `?name=&period=&start=&end=` on the clients listing.
#[derive(Debug, Default, Deserialize)]
pub struct ClientParams {
    pub name: Option<String>,
    pub period: Option<String>,
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl ClientParams {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.period.is_none() && self.start.is_none() && self.end.is_none()
    }
}
