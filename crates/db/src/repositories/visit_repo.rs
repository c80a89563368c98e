//! Repository for the `visits` table.
//!
//! A visit row is what makes an appointment attended. Every write here
//! updates the appointment's `status_id` in the same transaction so the two
//! never disagree.

use agenda_core::error::CoreError;
use agenda_core::lifecycle::{self, AppointmentStatus, BackfillPolicy};
use agenda_core::types::{DbId, StatusId};
use sqlx::SqlitePool;

use crate::error::DbResult;
use crate::models::visit::{CompletedVisit, EditVisit, FinalizeVisit};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, appointment_id, service_description, collaborator_id, completed";

/// Provides lifecycle operations for completed visits.
pub struct VisitRepo;

impl VisitRepo {
    /// Record the visit for a pending appointment and mark it attended.
    ///
    /// The selected service names are joined into the visit description.
    /// Under [`BackfillPolicy::Backfill`] the appointment's service text and
    /// collaborator are overwritten with what was performed.
    pub async fn finalize(
        pool: &SqlitePool,
        appointment_id: DbId,
        input: &FinalizeVisit,
        policy: BackfillPolicy,
    ) -> DbResult<CompletedVisit> {
        let description = lifecycle::join_service_names(&input.service_names)?;

        let mut tx = pool.begin().await?;

        let status_id: Option<StatusId> =
            sqlx::query_scalar("SELECT status_id FROM appointments WHERE id = $1")
                .bind(appointment_id)
                .fetch_optional(&mut *tx)
                .await?;
        let status_id = status_id.ok_or(CoreError::NotFound {
            entity: "Appointment",
            id: appointment_id,
        })?;
        let current = AppointmentStatus::from_id(status_id).ok_or_else(|| {
            CoreError::Internal(format!("Unknown appointment status id {status_id}"))
        })?;
        lifecycle::validate_transition(current, AppointmentStatus::Attended)?;

        let query = format!(
            "INSERT INTO visits (appointment_id, service_description, collaborator_id, completed)
             VALUES ($1, $2, $3, 1)
             RETURNING {COLUMNS}"
        );
        let visit = sqlx::query_as::<_, CompletedVisit>(&query)
            .bind(appointment_id)
            .bind(&description)
            .bind(input.collaborator_id)
            .fetch_one(&mut *tx)
            .await?;

        match policy {
            BackfillPolicy::Backfill => {
                sqlx::query(
                    "UPDATE appointments
                     SET status_id = $2, service_description = $3, collaborator_id = $4
                     WHERE id = $1",
                )
                .bind(appointment_id)
                .bind(AppointmentStatus::Attended.id())
                .bind(&description)
                .bind(input.collaborator_id)
                .execute(&mut *tx)
                .await?;
            }
            BackfillPolicy::PreserveBooking => {
                sqlx::query("UPDATE appointments SET status_id = $2 WHERE id = $1")
                    .bind(appointment_id)
                    .bind(AppointmentStatus::Attended.id())
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;

        tracing::info!(
            appointment_id,
            visit_id = visit.id,
            ?policy,
            "Finalized appointment",
        );
        Ok(visit)
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<CompletedVisit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visits WHERE id = $1");
        sqlx::query_as::<_, CompletedVisit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The visit recorded for an appointment, if it was attended.
    pub async fn find_by_appointment(
        pool: &SqlitePool,
        appointment_id: DbId,
    ) -> Result<Option<CompletedVisit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM visits WHERE appointment_id = $1");
        sqlx::query_as::<_, CompletedVisit>(&query)
            .bind(appointment_id)
            .fetch_optional(pool)
            .await
    }

    /// Correct what a visit recorded. The appointment is left as is.
    ///
    /// Returns `None` if no visit with the given `id` exists.
    pub async fn edit(
        pool: &SqlitePool,
        id: DbId,
        input: &EditVisit,
    ) -> DbResult<Option<CompletedVisit>> {
        let description = lifecycle::join_service_names(&input.service_names)?;

        let query = format!(
            "UPDATE visits SET service_description = $2, collaborator_id = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let visit = sqlx::query_as::<_, CompletedVisit>(&query)
            .bind(id)
            .bind(&description)
            .bind(input.collaborator_id)
            .fetch_optional(pool)
            .await?;
        Ok(visit)
    }

    /// Delete a visit, returning its appointment to pending.
    ///
    /// Returns `true` if a visit was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let appointment_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM visits WHERE id = $1 RETURNING appointment_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(appointment_id) = appointment_id else {
            return Ok(false);
        };

        sqlx::query("UPDATE appointments SET status_id = $2 WHERE id = $1")
            .bind(appointment_id)
            .bind(AppointmentStatus::Pending.id())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(visit_id = id, appointment_id, "Deleted visit, appointment back to pending");
        Ok(true)
    }
}
