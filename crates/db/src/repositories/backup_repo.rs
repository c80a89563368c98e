//! Whole-store export, restore and factory reset.
//!
//! A restore replaces every table inside one transaction. The snapshot is
//! checked for missing sections and dangling references before anything is
//! cleared, so a rejected file leaves the store untouched.
//!
//! Older files may carry visits flagged as not concluded. Those never made
//! their appointment attended, so a restore leaves them out and the
//! appointment comes back pending.

use std::collections::BTreeSet;

use agenda_core::error::CoreError;
use agenda_core::lifecycle::AppointmentStatus;
use agenda_core::snapshot::{self, SECTION_VISITS};
use agenda_core::types::DbId;
use agenda_core::validation::optional_text;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::DbResult;
use crate::models::snapshot::{
    ActivityFieldRecord, AppointmentRecord, CollaboratorRecord, ImportSummary, ServiceCollaboratorRecord,
    ServiceRecord, Snapshot, VisitRecord,
};
use crate::models::setting::KEY_NOTIFICATION_TEMPLATE;
use crate::repositories::ActivityFieldRepo;

/// Tables in the order they must be cleared so no foreign key dangles.
const CLEAR_ORDER: &[&str] = &[
    "settings",
    "service_collaborators",
    "visits",
    "appointments",
    "services",
    "collaborators",
    "activity_fields",
];

/// Provides backup and reset of the whole store.
pub struct BackupRepo;

impl BackupRepo {
    /// Read every table into a snapshot.
    ///
    /// All sections are read inside one transaction so they are consistent
    /// with each other.
    pub async fn export_all(pool: &SqlitePool) -> Result<Snapshot, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let activity_fields = sqlx::query_as::<_, ActivityFieldRecord>(
            "SELECT id, name FROM activity_fields ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;
        let services = sqlx::query_as::<_, ServiceRecord>(
            "SELECT id, name, description, is_favorite, activity_field_id
             FROM services ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;
        let collaborators = sqlx::query_as::<_, CollaboratorRecord>(
            "SELECT id, name FROM collaborators ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;
        let service_collaborators = sqlx::query_as::<_, ServiceCollaboratorRecord>(
            "SELECT service_id, collaborator_id FROM service_collaborators
             ORDER BY service_id, collaborator_id",
        )
        .fetch_all(&mut *tx)
        .await?;
        let appointments = sqlx::query_as::<_, AppointmentRecord>(
            "SELECT id, client_name AS name, client_phone AS phone, service_description,
                    date, time, collaborator_id
             FROM appointments ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;
        let visits = sqlx::query_as::<_, VisitRecord>(
            "SELECT id, appointment_id, service_description, collaborator_id, completed
             FROM visits ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;
        let notification_template =
            sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = $1")
                .bind(KEY_NOTIFICATION_TEMPLATE)
                .fetch_optional(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Snapshot {
            activity_fields,
            services,
            collaborators,
            service_collaborators,
            appointments,
            visits,
            notification_template,
        })
    }

    /// Restore from a raw JSON document.
    ///
    /// A document missing any section is rejected with
    /// [`CoreError::Integrity`] before it is parsed further.
    pub async fn import_value(
        pool: &SqlitePool,
        value: serde_json::Value,
    ) -> DbResult<ImportSummary> {
        snapshot::validate_sections(&value)?;
        let parsed: Snapshot = serde_json::from_value(value)
            .map_err(|e| CoreError::Integrity(format!("Malformed snapshot: {e}")))?;
        Self::import_all(pool, &parsed).await
    }

    /// Replace the whole store with `snapshot`, preserving primary keys.
    ///
    /// Appointment status is derived from which appointments have a
    /// concluded visit. The notification template is replaced as well.
    pub async fn import_all(pool: &SqlitePool, snapshot: &Snapshot) -> DbResult<ImportSummary> {
        check_references(snapshot)?;

        let (visits, unfinished): (Vec<&VisitRecord>, Vec<&VisitRecord>) =
            snapshot.visits.iter().partition(|v| v.completed);
        if !unfinished.is_empty() {
            tracing::warn!(
                skipped = unfinished.len(),
                "Leaving out visits not marked as concluded"
            );
        }

        let mut tx = pool.begin().await?;
        clear_tables(&mut tx).await?;

        for field in &snapshot.activity_fields {
            sqlx::query("INSERT INTO activity_fields (id, name) VALUES ($1, $2)")
                .bind(field.id)
                .bind(&field.name)
                .execute(&mut *tx)
                .await?;
        }
        for service in &snapshot.services {
            sqlx::query(
                "INSERT INTO services (id, name, description, is_favorite, activity_field_id)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(service.id)
            .bind(&service.name)
            .bind(&service.description)
            .bind(service.is_favorite)
            .bind(service.activity_field_id)
            .execute(&mut *tx)
            .await?;
        }
        for collaborator in &snapshot.collaborators {
            sqlx::query("INSERT INTO collaborators (id, name) VALUES ($1, $2)")
                .bind(collaborator.id)
                .bind(&collaborator.name)
                .execute(&mut *tx)
                .await?;
        }
        for link in &snapshot.service_collaborators {
            sqlx::query(
                "INSERT OR IGNORE INTO service_collaborators (service_id, collaborator_id)
                 VALUES ($1, $2)",
            )
            .bind(link.service_id)
            .bind(link.collaborator_id)
            .execute(&mut *tx)
            .await?;
        }
        for appointment in &snapshot.appointments {
            sqlx::query(
                "INSERT INTO appointments
                    (id, client_name, client_phone, service_description, date, time, collaborator_id, status_id)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(appointment.id)
            .bind(&appointment.name)
            .bind(&appointment.phone)
            .bind(&appointment.service_description)
            .bind(appointment.date)
            .bind(appointment.time)
            .bind(appointment.collaborator_id)
            .bind(AppointmentStatus::Pending.id())
            .execute(&mut *tx)
            .await?;
        }
        for visit in &visits {
            sqlx::query(
                "INSERT INTO visits (id, appointment_id, service_description, collaborator_id, completed)
                 VALUES ($1, $2, $3, $4, 1)",
            )
            .bind(visit.id)
            .bind(visit.appointment_id)
            .bind(&visit.service_description)
            .bind(visit.collaborator_id)
            .execute(&mut *tx)
            .await?;
        }
        if let Some(template) = optional_text(snapshot.notification_template.as_deref()) {
            sqlx::query("INSERT INTO settings (key, value) VALUES ($1, $2)")
                .bind(KEY_NOTIFICATION_TEMPLATE)
                .bind(template)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            "UPDATE appointments SET status_id = $1
             WHERE id IN (SELECT appointment_id FROM visits)",
        )
        .bind(AppointmentStatus::Attended.id())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let summary = ImportSummary {
            visits: visits.len(),
            ..ImportSummary::from(snapshot)
        };
        tracing::info!(rows = snapshot.row_count(), ?summary, "Restored snapshot");
        Ok(summary)
    }

    /// Delete every row, settings included, and reseed the activity-field
    /// catalog.
    pub async fn clear_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        clear_tables(&mut tx).await?;
        ActivityFieldRepo::seed_catalog_in(&mut tx).await?;
        tx.commit().await?;

        tracing::info!("Cleared all data");
        Ok(())
    }
}

async fn clear_tables(tx: &mut Transaction<'_, Sqlite>) -> Result<(), sqlx::Error> {
    for table in CLEAR_ORDER {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

/// Reject duplicate ids and dangling references before touching the store.
fn check_references(snapshot: &Snapshot) -> Result<(), CoreError> {
    let fields = snapshot::ensure_unique_ids(
        "activityFields",
        snapshot.activity_fields.iter().map(|f| f.id),
    )?;
    let services = snapshot::ensure_unique_ids("services", snapshot.services.iter().map(|s| s.id))?;
    let collaborators = snapshot::ensure_unique_ids(
        "colaboradores",
        snapshot.collaborators.iter().map(|c| c.id),
    )?;
    let appointments = snapshot::ensure_unique_ids(
        "appointments",
        snapshot.appointments.iter().map(|a| a.id),
    )?;
    snapshot::ensure_unique_ids(SECTION_VISITS, snapshot.visits.iter().map(|v| v.id))?;

    snapshot::ensure_references(
        "services.activityFieldId",
        &fields,
        snapshot.services.iter().map(|s| s.activity_field_id),
    )?;
    snapshot::ensure_references(
        "serviceColaboradores.serviceId",
        &services,
        snapshot.service_collaborators.iter().map(|l| Some(l.service_id)),
    )?;
    snapshot::ensure_references(
        "serviceColaboradores.colaboradorId",
        &collaborators,
        snapshot.service_collaborators.iter().map(|l| Some(l.collaborator_id)),
    )?;
    snapshot::ensure_references(
        "appointments.colaboradorId",
        &collaborators,
        snapshot.appointments.iter().map(|a| a.collaborator_id),
    )?;
    snapshot::ensure_references(
        "atendimentos.appointmentId",
        &appointments,
        snapshot.visits.iter().map(|v| Some(v.appointment_id)),
    )?;
    snapshot::ensure_references(
        "atendimentos.colaboradorId",
        &collaborators,
        snapshot.visits.iter().map(|v| v.collaborator_id),
    )?;

    let mut visited: BTreeSet<DbId> = BTreeSet::new();
    for visit in snapshot.visits.iter().filter(|v| v.completed) {
        if !visited.insert(visit.appointment_id) {
            return Err(CoreError::Integrity(format!(
                "Appointment {} has more than one visit",
                visit.appointment_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn appointment(id: DbId, collaborator_id: Option<DbId>) -> AppointmentRecord {
        AppointmentRecord {
            id,
            name: "Ana".into(),
            phone: "11999990000".into(),
            service_description: None,
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            collaborator_id,
        }
    }

    fn visit(id: DbId, appointment_id: DbId) -> VisitRecord {
        VisitRecord {
            id,
            appointment_id,
            service_description: "Banho".into(),
            collaborator_id: None,
            completed: true,
        }
    }

    #[test]
    fn dangling_collaborator_rejected() {
        let snapshot = Snapshot {
            appointments: vec![appointment(1, Some(9))],
            ..Snapshot::default()
        };
        assert_matches!(
            check_references(&snapshot),
            Err(CoreError::Integrity(msg)) if msg.contains("appointments.colaboradorId")
        );
    }

    #[test]
    fn second_visit_for_same_appointment_rejected() {
        let snapshot = Snapshot {
            appointments: vec![appointment(1, None)],
            visits: vec![visit(1, 1), visit(2, 1)],
            ..Snapshot::default()
        };
        assert_matches!(check_references(&snapshot), Err(CoreError::Integrity(_)));
    }

    #[test]
    fn unfinished_visit_does_not_count_as_second() {
        let unfinished = VisitRecord {
            completed: false,
            ..visit(2, 1)
        };
        let snapshot = Snapshot {
            appointments: vec![appointment(1, None)],
            visits: vec![visit(1, 1), unfinished],
            ..Snapshot::default()
        };
        assert!(check_references(&snapshot).is_ok());
    }

    #[test]
    fn consistent_snapshot_passes() {
        let snapshot = Snapshot {
            appointments: vec![appointment(1, None), appointment(2, None)],
            visits: vec![visit(1, 2)],
            ..Snapshot::default()
        };
        assert!(check_references(&snapshot).is_ok());
    }
}
