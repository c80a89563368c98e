//! Business sector rows.

use agenda_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activity_fields` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ActivityField {
    pub id: DbId,
    pub name: String,
}

/// Body of the "import services from another field" request.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportServices {
    pub source_field_id: DbId,
}
