//! Repository for the `collaborators` table and its service affinity.

use agenda_core::types::DbId;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::collaborator::{
    Collaborator, CreateCollaborator, RankedCollaborator, UpdateCollaborator,
};
use crate::models::service::Service;

/// Provides CRUD operations for collaborators and their service affinity.
pub struct CollaboratorRepo;

impl CollaboratorRepo {
    /// Insert a collaborator together with the initial affinity set.
    pub async fn create(
        pool: &SqlitePool,
        input: &CreateCollaborator,
    ) -> Result<Collaborator, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let collaborator = sqlx::query_as::<_, Collaborator>(
            "INSERT INTO collaborators (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&input.name)
        .fetch_one(&mut *tx)
        .await?;
        Self::insert_affinity(&mut tx, collaborator.id, &input.service_ids).await?;

        tx.commit().await?;
        Ok(collaborator)
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Collaborator>, sqlx::Error> {
        sqlx::query_as::<_, Collaborator>("SELECT id, name FROM collaborators WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all collaborators alphabetically.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Collaborator>, sqlx::Error> {
        sqlx::query_as::<_, Collaborator>("SELECT id, name FROM collaborators ORDER BY name, id")
            .fetch_all(pool)
            .await
    }

    /// Rename a collaborator. Returns `None` if the row does not exist.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateCollaborator,
    ) -> Result<Option<Collaborator>, sqlx::Error> {
        sqlx::query_as::<_, Collaborator>(
            "UPDATE collaborators SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(&input.name)
        .fetch_optional(pool)
        .await
    }

    /// Delete a collaborator.
    ///
    /// Affinity rows go with it. Appointments and visits that named the
    /// collaborator are kept with the reference cleared.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM service_collaborators WHERE collaborator_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let appointments = sqlx::query(
            "UPDATE appointments SET collaborator_id = NULL WHERE collaborator_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        let visits = sqlx::query("UPDATE visits SET collaborator_id = NULL WHERE collaborator_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let result = sqlx::query("DELETE FROM collaborators WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(collaborator_id = id, appointments, visits, "Deleted collaborator");
        }
        Ok(deleted)
    }

    /// Replace the set of services a collaborator has affinity for.
    pub async fn set_services(
        pool: &SqlitePool,
        collaborator_id: DbId,
        service_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM service_collaborators WHERE collaborator_id = $1")
            .bind(collaborator_id)
            .execute(&mut *tx)
            .await?;
        Self::insert_affinity(&mut tx, collaborator_id, service_ids).await?;

        tx.commit().await?;
        Ok(())
    }

    /// Services the collaborator has affinity for, by name.
    pub async fn list_services(
        pool: &SqlitePool,
        collaborator_id: DbId,
    ) -> Result<Vec<Service>, sqlx::Error> {
        sqlx::query_as::<_, Service>(
            "SELECT s.id, s.name, s.description, s.is_favorite, s.activity_field_id
             FROM services s
             JOIN service_collaborators sc ON sc.service_id = s.id
             WHERE sc.collaborator_id = $1
             ORDER BY s.name, s.id",
        )
        .bind(collaborator_id)
        .fetch_all(pool)
        .await
    }

    /// Collaborators with affinity for a service, by name.
    pub async fn list_for_service(
        pool: &SqlitePool,
        service_id: DbId,
    ) -> Result<Vec<Collaborator>, sqlx::Error> {
        sqlx::query_as::<_, Collaborator>(
            "SELECT c.id, c.name
             FROM collaborators c
             JOIN service_collaborators sc ON sc.collaborator_id = c.id
             WHERE sc.service_id = $1
             ORDER BY c.name, c.id",
        )
        .bind(service_id)
        .fetch_all(pool)
        .await
    }

    /// Every collaborator, those with affinity for the service first.
    ///
    /// Affinity is a hint for the booking form, not a restriction, so the
    /// rest are still listed.
    pub async fn ranked_for_service(
        pool: &SqlitePool,
        service_id: DbId,
    ) -> Result<Vec<RankedCollaborator>, sqlx::Error> {
        sqlx::query_as::<_, RankedCollaborator>(
            "SELECT c.id, c.name,
                    EXISTS (
                        SELECT 1 FROM service_collaborators sc
                        WHERE sc.collaborator_id = c.id AND sc.service_id = $1
                    ) AS has_affinity
             FROM collaborators c
             ORDER BY has_affinity DESC, c.name, c.id",
        )
        .bind(service_id)
        .fetch_all(pool)
        .await
    }

    async fn insert_affinity(
        tx: &mut Transaction<'_, Sqlite>,
        collaborator_id: DbId,
        service_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for service_id in service_ids {
            sqlx::query(
                "INSERT OR IGNORE INTO service_collaborators (service_id, collaborator_id)
                 VALUES ($1, $2)",
            )
            .bind(service_id)
            .bind(collaborator_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}
