//! Portable backup snapshot.
//!
//! Field names follow the backup file format (camelCase, Portuguese table
//! keys) so files produced by earlier versions of the app still restore.

use agenda_core::slot::hhmm;
use agenda_core::types::{Date, DbId, Time};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// Every table of the store, keyed by section name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "activityFields")]
    pub activity_fields: Vec<ActivityFieldRecord>,
    pub services: Vec<ServiceRecord>,
    #[serde(rename = "colaboradores")]
    pub collaborators: Vec<CollaboratorRecord>,
    #[serde(rename = "serviceColaboradores")]
    pub service_collaborators: Vec<ServiceCollaboratorRecord>,
    pub appointments: Vec<AppointmentRecord>,
    #[serde(rename = "atendimentos")]
    pub visits: Vec<VisitRecord>,
    /// Custom client notification template. Absent while the built-in one
    /// is in use.
    #[serde(
        rename = "appointmentText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub notification_template: Option<String>,
}

impl Snapshot {
    pub fn row_count(&self) -> usize {
        self.activity_fields.len()
            + self.services.len()
            + self.collaborators.len()
            + self.service_collaborators.len()
            + self.appointments.len()
            + self.visits.len()
    }
}

/// Rows written per section by a restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub activity_fields: usize,
    pub services: usize,
    pub collaborators: usize,
    pub service_collaborators: usize,
    pub appointments: usize,
    pub visits: usize,
}

impl From<&Snapshot> for ImportSummary {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            activity_fields: snapshot.activity_fields.len(),
            services: snapshot.services.len(),
            collaborators: snapshot.collaborators.len(),
            service_collaborators: snapshot.service_collaborators.len(),
            appointments: snapshot.appointments.len(),
            visits: snapshot.visits.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ActivityFieldRecord {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    pub id: DbId,
    #[serde(alias = "serviceName")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_favorite: bool,
    #[serde(default)]
    pub activity_field_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct CollaboratorRecord {
    pub id: DbId,
    #[serde(alias = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ServiceCollaboratorRecord {
    #[serde(rename = "serviceId")]
    pub service_id: DbId,
    #[serde(rename = "colaboradorId", alias = "collaboratorId")]
    pub collaborator_id: DbId,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    #[serde(rename = "serviceDescription", default)]
    pub service_description: Option<String>,
    pub date: Date,
    #[serde(with = "hhmm")]
    pub time: Time,
    #[serde(rename = "colaboradorId", alias = "collaboratorId", default)]
    pub collaborator_id: Option<DbId>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: DbId,
    #[serde(rename = "appointmentId")]
    pub appointment_id: DbId,
    #[serde(rename = "serviceDescription")]
    pub service_description: String,
    #[serde(rename = "colaboradorId", alias = "collaboratorId", default)]
    pub collaborator_id: Option<DbId>,
    #[serde(rename = "atendimentoConcluido", default = "default_completed", deserialize_with = "flag")]
    pub completed: bool,
}

fn default_completed() -> bool {
    true
}

/// Accept `true`/`false` as well as the `0`/`1` integers older files use.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_field_names_and_integer_flags_load() {
        let json = serde_json::json!({
            "activityFields": [{"id": 1, "name": "Pet Shop"}],
            "services": [{"id": 3, "serviceName": "Banho", "isFavorite": 1, "activityFieldId": 1}],
            "colaboradores": [{"id": 2, "nome": "Rita"}],
            "serviceColaboradores": [{"serviceId": 3, "colaboradorId": 2}],
            "appointments": [{
                "id": 7, "name": "Ana", "phone": "11999990000",
                "serviceDescription": "Banho", "date": "2024-03-10",
                "time": "09:30", "colaboradorId": 2
            }],
            "atendimentos": [{
                "id": 1, "appointmentId": 7, "serviceDescription": "Banho",
                "colaboradorId": null, "atendimentoConcluido": 1
            }]
        });

        let snapshot: Snapshot = serde_json::from_value(json).unwrap();
        assert_eq!(snapshot.services[0].name, "Banho");
        assert!(snapshot.services[0].is_favorite);
        assert_eq!(snapshot.collaborators[0].name, "Rita");
        assert!(snapshot.visits[0].completed);
        assert_eq!(snapshot.row_count(), 6);
    }

    #[test]
    fn serializes_with_section_names() {
        let value = serde_json::to_value(Snapshot::default()).unwrap();
        for key in agenda_core::snapshot::ALL_SECTIONS {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
