//! Repository for the `appointments` table.

use agenda_core::lifecycle::AppointmentStatus;
use agenda_core::scheduling::{self, SlotCheck, SlotOccupant};
use agenda_core::types::{Date, DbId, Time};
use chrono::NaiveDateTime;
use sqlx::{FromRow, SqlitePool};

use crate::models::appointment::{
    Appointment, CompletedAppointmentView, CreateAppointment, PendingAppointmentView,
    UpdateAppointment,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, client_name, client_phone, service_description, date, time, collaborator_id, status_id";

#[derive(FromRow)]
struct OccupantRow {
    id: DbId,
    date: Date,
    time: Time,
}

/// Provides CRUD operations and the scheduling views for appointments.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Book a new appointment. It starts out pending.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateAppointment,
    ) -> Result<Appointment, sqlx::Error> {
        let query = format!(
            "INSERT INTO appointments
                (client_name, client_phone, service_description, date, time, collaborator_id, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(&input.client_name)
            .bind(&input.client_phone)
            .bind(&input.service_description)
            .bind(input.date)
            .bind(input.time)
            .bind(input.collaborator_id)
            .bind(AppointmentStatus::Pending.id())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM appointments WHERE id = $1");
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the booking fields of an appointment. Status is untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateAppointment,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET
                client_name = $2,
                client_phone = $3,
                service_description = $4,
                date = $5,
                time = $6,
                collaborator_id = $7
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(&input.client_name)
            .bind(&input.client_phone)
            .bind(&input.service_description)
            .bind(input.date)
            .bind(input.time)
            .bind(input.collaborator_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an appointment and its visit, if any.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM visits WHERE appointment_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(appointment_id = id, "Deleted appointment");
        }
        Ok(deleted)
    }

    /// Pending appointments in chronological order, with collaborator names.
    pub async fn list_pending(pool: &SqlitePool) -> Result<Vec<PendingAppointmentView>, sqlx::Error> {
        sqlx::query_as::<_, PendingAppointmentView>(
            "SELECT a.id, a.client_name, a.client_phone, a.service_description,
                    a.date, a.time, a.collaborator_id, c.name AS collaborator_name
             FROM appointments a
             LEFT JOIN collaborators c ON c.id = a.collaborator_id
             WHERE a.status_id = $1
             ORDER BY a.date, a.time, a.id",
        )
        .bind(AppointmentStatus::Pending.id())
        .fetch_all(pool)
        .await
    }

    /// Attended appointments in chronological order.
    ///
    /// Service text and collaborator are taken from the visit, which records
    /// what was actually performed.
    pub async fn list_completed(
        pool: &SqlitePool,
    ) -> Result<Vec<CompletedAppointmentView>, sqlx::Error> {
        sqlx::query_as::<_, CompletedAppointmentView>(
            "SELECT a.id, v.id AS visit_id, a.client_name, a.client_phone,
                    v.service_description, a.date, a.time,
                    v.collaborator_id, c.name AS collaborator_name
             FROM appointments a
             JOIN visits v ON v.appointment_id = a.id
             LEFT JOIN collaborators c ON c.id = v.collaborator_id
             WHERE v.completed = 1
             ORDER BY a.date, a.time, a.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Pending appointments booked on `date`.
    pub async fn pending_occupants(
        pool: &SqlitePool,
        date: Date,
    ) -> Result<Vec<SlotOccupant>, sqlx::Error> {
        let rows = sqlx::query_as::<_, OccupantRow>(
            "SELECT id, date, time FROM appointments WHERE status_id = $1 AND date = $2",
        )
        .bind(AppointmentStatus::Pending.id())
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SlotOccupant {
                id: r.id,
                date: r.date,
                time: r.time,
            })
            .collect())
    }

    /// Whether another pending appointment holds the slot.
    pub async fn has_conflict(
        pool: &SqlitePool,
        date: Date,
        time: Time,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let occupants = Self::pending_occupants(pool, date).await?;
        Ok(scheduling::has_conflict(&occupants, date, time, exclude_id))
    }

    /// Conflict and past-slot flags for a candidate booking.
    pub async fn check_slot(
        pool: &SqlitePool,
        date: Date,
        time: Time,
        exclude_id: Option<DbId>,
        now: NaiveDateTime,
    ) -> Result<SlotCheck, sqlx::Error> {
        Ok(SlotCheck {
            conflict: Self::has_conflict(pool, date, time, exclude_id).await?,
            in_past: scheduling::is_in_past(date, time, now),
        })
    }

    /// Appointments whose service text is exactly `service_name`.
    pub async fn linked_to_service(
        pool: &SqlitePool,
        service_name: &str,
    ) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments
             WHERE service_description = $1
             ORDER BY date, time, id"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(service_name)
            .fetch_all(pool)
            .await
    }

    /// Clear the service text of every appointment booked as `service_name`.
    pub async fn clear_service_description(
        pool: &SqlitePool,
        service_name: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE appointments SET service_description = NULL WHERE service_description = $1",
        )
        .bind(service_name)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
