//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO for edits

pub mod activity_field;
pub mod appointment;
pub mod collaborator;
pub mod service;
pub mod setting;
pub mod snapshot;
pub mod visit;
