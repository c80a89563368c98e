//! Completed visit ("atendimento") model and DTOs.

use agenda_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `visits` table.
///
/// The row existing is what makes its appointment attended; `completed` is
/// always `true` for rows written by this crate.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CompletedVisit {
    pub id: DbId,
    pub appointment_id: DbId,
    pub service_description: String,
    pub collaborator_id: Option<DbId>,
    pub completed: bool,
}

/// DTO for finalizing an appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct FinalizeVisit {
    pub service_names: Vec<String>,
    pub collaborator_id: Option<DbId>,
}

/// DTO for editing a recorded visit.
pub type EditVisit = FinalizeVisit;
