//! Appointment lifecycle state machine.
//!
//! An appointment is `Pending` until a completed visit is recorded for it,
//! which moves it to `Attended`. Deleting that visit is the only way back.
//! The visit itself stays editable while the appointment is attended.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::StatusId;

/// Separator used when storing a list of performed services as text.
pub const SERVICE_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Appointment status IDs matching `appointment_statuses` seed data.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending = 1,
    Attended = 2,
}

impl AppointmentStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Map a database status ID back to the enum.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::Pending),
            2 => Some(Self::Attended),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Attended => "attended",
        }
    }
}

impl From<AppointmentStatus> for StatusId {
    fn from(value: AppointmentStatus) -> Self {
        value as StatusId
    }
}

/// States reachable from `from`.
pub fn valid_transitions(from: AppointmentStatus) -> &'static [AppointmentStatus] {
    match from {
        // Finalizing records a visit.
        AppointmentStatus::Pending => &[AppointmentStatus::Attended],
        // Deleting the visit reopens the appointment.
        AppointmentStatus::Attended => &[AppointmentStatus::Pending],
    }
}

pub fn can_transition(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    valid_transitions(from).contains(&to)
}

/// Validate a transition, producing a `Conflict` for illegal moves.
pub fn validate_transition(from: AppointmentStatus, to: AppointmentStatus) -> Result<(), CoreError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Invalid appointment transition: {} -> {}",
            from.name(),
            to.name()
        )))
    }
}

// ---------------------------------------------------------------------------
// Finalize policy
// ---------------------------------------------------------------------------

/// Whether finalizing a visit also rewrites the originating appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackfillPolicy {
    /// Copy the performed services and collaborator onto the appointment.
    #[default]
    Backfill,
    /// Leave the appointment's booking fields as originally entered.
    PreserveBooking,
}

impl BackfillPolicy {
    pub fn from_flag(backfill: bool) -> Self {
        if backfill {
            Self::Backfill
        } else {
            Self::PreserveBooking
        }
    }
}

// ---------------------------------------------------------------------------
// Service lists
// ---------------------------------------------------------------------------

/// Join the selected service names into a visit description.
///
/// Fails when nothing was selected or a selected name is blank.
pub fn join_service_names(names: &[String]) -> Result<String, CoreError> {
    if names.is_empty() {
        return Err(CoreError::Validation(
            "Select at least one service".to_string(),
        ));
    }
    let trimmed: Vec<&str> = names.iter().map(|n| n.trim()).collect();
    if trimmed.iter().any(|n| n.is_empty()) {
        return Err(CoreError::Validation(
            "Service names must not be blank".to_string(),
        ));
    }
    Ok(trimmed.join(SERVICE_SEPARATOR))
}

/// Split a stored description back into the individual service names.
pub fn split_service_description(description: &str) -> Vec<String> {
    description
        .split(SERVICE_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pending_to_attended() {
        assert!(can_transition(
            AppointmentStatus::Pending,
            AppointmentStatus::Attended
        ));
    }

    #[test]
    fn attended_back_to_pending() {
        assert!(can_transition(
            AppointmentStatus::Attended,
            AppointmentStatus::Pending
        ));
    }

    #[test]
    fn attended_cannot_be_finalized_again() {
        assert_matches!(
            validate_transition(AppointmentStatus::Attended, AppointmentStatus::Attended),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn status_ids_round_trip() {
        for status in [AppointmentStatus::Pending, AppointmentStatus::Attended] {
            assert_eq!(AppointmentStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(AppointmentStatus::from_id(9), None);
    }

    #[test]
    fn join_requires_a_service() {
        assert_matches!(join_service_names(&[]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn join_rejects_blank_names() {
        let names = vec!["Banho".to_string(), "  ".to_string()];
        assert_matches!(join_service_names(&names), Err(CoreError::Validation(_)));
    }

    #[test]
    fn join_uses_comma_space() {
        let names = vec!["A".to_string(), " B ".to_string()];
        assert_eq!(join_service_names(&names).unwrap(), "A, B");
    }

    #[test]
    fn split_inverts_join() {
        assert_eq!(
            split_service_description("Banho, Tosa"),
            vec!["Banho".to_string(), "Tosa".to_string()]
        );
        assert!(split_service_description("").is_empty());
    }

    #[test]
    fn backfill_flag_mapping() {
        assert_eq!(BackfillPolicy::from_flag(true), BackfillPolicy::Backfill);
        assert_eq!(
            BackfillPolicy::from_flag(false),
            BackfillPolicy::PreserveBooking
        );
        assert_eq!(BackfillPolicy::default(), BackfillPolicy::Backfill);
    }
}
