//! Collaborator (staff member) model and DTOs.

use agenda_core::error::CoreError;
use agenda_core::types::DbId;
use agenda_core::validation::require_text;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `collaborators` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Collaborator {
    pub id: DbId,
    pub name: String,
}

/// A collaborator annotated with whether they have affinity for a service.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RankedCollaborator {
    pub id: DbId,
    pub name: String,
    pub has_affinity: bool,
}

/// DTO for creating a collaborator, optionally with initial service affinity.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCollaborator {
    pub name: String,
    #[serde(default)]
    pub service_ids: Vec<DbId>,
}

impl CreateCollaborator {
    pub fn normalize(self) -> Result<Self, CoreError> {
        Ok(Self {
            name: require_text("Collaborator name", &self.name)?,
            ..self
        })
    }
}

/// DTO for renaming a collaborator.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCollaborator {
    pub name: String,
}

impl UpdateCollaborator {
    pub fn normalize(self) -> Result<Self, CoreError> {
        Ok(Self {
            name: require_text("Collaborator name", &self.name)?,
        })
    }
}

/// Replacement set of services a collaborator has affinity for.
#[derive(Debug, Clone, Deserialize)]
pub struct SetCollaboratorServices {
    pub service_ids: Vec<DbId>,
}
