//! Appointment entity model, DTOs and the two scheduling views.

use agenda_core::error::CoreError;
use agenda_core::lifecycle::AppointmentStatus;
use agenda_core::slot::{hhmm, validate_slot};
use agenda_core::types::{Date, DbId, StatusId, Time};
use agenda_core::validation::{optional_text, ClientContact};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `appointments` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub client_name: String,
    pub client_phone: String,
    /// Service name(s) as text at booking time. Not a foreign key.
    pub service_description: Option<String>,
    pub date: Date,
    #[serde(with = "hhmm")]
    pub time: Time,
    pub collaborator_id: Option<DbId>,
    pub status_id: StatusId,
}

impl Appointment {
    pub fn status(&self) -> Option<AppointmentStatus> {
        AppointmentStatus::from_id(self.status_id)
    }

    pub fn is_pending(&self) -> bool {
        self.status() == Some(AppointmentStatus::Pending)
    }
}

/// DTO for booking an appointment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointment {
    pub client_name: String,
    pub client_phone: String,
    pub service_description: Option<String>,
    pub date: Date,
    #[serde(with = "hhmm")]
    pub time: Time,
    pub collaborator_id: Option<DbId>,
    /// Operator confirmed booking over an occupied slot. Not persisted.
    #[serde(default)]
    pub allow_double_booking: bool,
}

impl CreateAppointment {
    /// Validate contact details and slot, returning the normalized input.
    pub fn normalize(self) -> Result<Self, CoreError> {
        let contact = ClientContact::parse(&self.client_name, &self.client_phone)?;
        validate_slot(self.time)?;
        Ok(Self {
            client_name: contact.name,
            client_phone: contact.phone,
            service_description: optional_text(self.service_description.as_deref()),
            ..self
        })
    }
}

/// DTO for editing an appointment. The edit form resubmits every field.
pub type UpdateAppointment = CreateAppointment;

/// A pending appointment joined with its collaborator's name.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct PendingAppointmentView {
    pub id: DbId,
    pub client_name: String,
    pub client_phone: String,
    pub service_description: Option<String>,
    pub date: Date,
    #[serde(with = "hhmm")]
    pub time: Time,
    pub collaborator_id: Option<DbId>,
    pub collaborator_name: Option<String>,
}

/// An attended appointment carrying what the visit actually recorded.
///
/// `service_description` and `collaborator_id` come from the visit row,
/// which may have been edited after completion.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CompletedAppointmentView {
    pub id: DbId,
    pub visit_id: DbId,
    pub client_name: String,
    pub client_phone: String,
    pub service_description: String,
    pub date: Date,
    #[serde(with = "hhmm")]
    pub time: Time,
    pub collaborator_id: Option<DbId>,
    pub collaborator_name: Option<String>,
}
