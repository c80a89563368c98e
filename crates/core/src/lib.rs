//! Domain rules for the appointment scheduler.
//!
//! Nothing in this crate performs I/O. The `db` crate persists the entities
//! and calls into these modules for slot, lifecycle, templating and
//! aggregation rules.

pub mod activity_field;
pub mod clients;
pub mod error;
pub mod lifecycle;
pub mod notification;
pub mod scheduling;
pub mod slot;
pub mod snapshot;
pub mod types;
pub mod validation;
