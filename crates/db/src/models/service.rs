//! Service entity model and DTOs.

use agenda_core::error::CoreError;
use agenda_core::types::DbId;
use agenda_core::validation::{optional_text, require_text};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A row from the `services` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Service {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    /// Display ordering hint only.
    pub is_favorite: bool,
    pub activity_field_id: Option<DbId>,
}

/// DTO for creating a new service.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateService {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `false` if omitted.
    pub is_favorite: Option<bool>,
    pub activity_field_id: Option<DbId>,
}

impl CreateService {
    pub fn normalize(self) -> Result<Self, CoreError> {
        Ok(Self {
            name: require_text("Service name", &self.name)?,
            description: optional_text(self.description.as_deref()),
            ..self
        })
    }
}

/// DTO for partially updating a service.
///
/// Omitted keys leave the column alone. `description` and
/// `activity_field_id` use `Option<Option<_>>` so an explicit `null` clears
/// the value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateService {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    pub is_favorite: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub activity_field_id: Option<Option<DbId>>,
}

/// Map a key that is present, `null` included, to `Some`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl UpdateService {
    pub fn normalize(self) -> Result<Self, CoreError> {
        let name = match self.name.as_deref() {
            Some(name) => Some(require_text("Service name", name)?),
            None => None,
        };
        Ok(Self {
            name,
            description: self.description.map(|d| optional_text(d.as_deref())),
            ..self
        })
    }
}
