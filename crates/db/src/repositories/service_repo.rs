//! Repository for the `services` table.

use agenda_core::activity_field;
use agenda_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::activity_field::ActivityField;
use crate::models::service::{CreateService, Service, UpdateService};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, is_favorite, activity_field_id";

/// Provides CRUD operations for services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// Insert a new service, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateService) -> Result<Service, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (name, description, is_favorite, activity_field_id)
             VALUES ($1, $2, COALESCE($3, 0), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.is_favorite)
            .bind(input.activity_field_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List services, favorites first then by name.
    ///
    /// When `activity_field_id` is given only that sector's services are
    /// returned.
    pub async fn list(
        pool: &SqlitePool,
        activity_field_id: Option<DbId>,
    ) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM services
             WHERE ($1 IS NULL OR activity_field_id = $1)
             ORDER BY is_favorite DESC, name ASC, id ASC"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(activity_field_id)
            .fetch_all(pool)
            .await
    }

    /// Update a service. Omitted fields are kept; `description` and
    /// `activity_field_id` are cleared when explicitly set to `None`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateService,
    ) -> Result<Option<Service>, sqlx::Error> {
        let query = format!(
            "UPDATE services SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                is_favorite = COALESCE($5, is_favorite),
                activity_field_id = CASE WHEN $6 THEN $7 ELSE activity_field_id END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .bind(input.is_favorite)
            .bind(input.activity_field_id.is_some())
            .bind(input.activity_field_id.flatten())
            .fetch_optional(pool)
            .await
    }

    /// Delete a service and its affinity rows. Returns `true` if it existed.
    ///
    /// Appointments keep their service text; it is not a foreign key.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM service_collaborators WHERE service_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a service after clearing the service text of every
    /// appointment booked under its name.
    ///
    /// Returns the number of appointments detached, or `None` if the service
    /// does not exist.
    pub async fn delete_detaching_appointments(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let name: Option<String> = sqlx::query_scalar("SELECT name FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(name) = name else {
            return Ok(None);
        };

        let detached = sqlx::query(
            "UPDATE appointments SET service_description = NULL WHERE service_description = $1",
        )
        .bind(&name)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        sqlx::query("DELETE FROM service_collaborators WHERE service_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(service_id = id, service = %name, detached, "Deleted service and detached appointments");
        Ok(Some(detached))
    }

    /// Insert the catalog's default services for a sector.
    ///
    /// Names the sector already has are skipped, so repeating the call adds
    /// nothing. Returns the rows inserted.
    pub async fn insert_defaults(
        pool: &SqlitePool,
        field: &ActivityField,
    ) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (name, activity_field_id)
             SELECT $1, $2
             WHERE NOT EXISTS (
                 SELECT 1 FROM services WHERE activity_field_id = $2 AND name = $1
             )
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut inserted = Vec::new();
        for name in activity_field::default_services(&field.name) {
            let row = sqlx::query_as::<_, Service>(&query)
                .bind(*name)
                .bind(field.id)
                .fetch_optional(&mut *tx)
                .await?;
            inserted.extend(row);
        }
        tx.commit().await?;

        tracing::info!(activity_field = %field.name, inserted = inserted.len(), "Inserted default services");
        Ok(inserted)
    }

    /// Copy every service of `source_field_id` into `target_field_id`.
    ///
    /// Names already present in the target are skipped. Returns the rows
    /// inserted.
    pub async fn import_from_field(
        pool: &SqlitePool,
        source_field_id: DbId,
        target_field_id: DbId,
    ) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!(
            "INSERT INTO services (name, description, is_favorite, activity_field_id)
             SELECT s.name, s.description, s.is_favorite, $2
             FROM services s
             WHERE s.activity_field_id = $1
               AND NOT EXISTS (
                   SELECT 1 FROM services t
                   WHERE t.activity_field_id = $2 AND t.name = s.name
               )
             RETURNING {COLUMNS}"
        );
        let imported = sqlx::query_as::<_, Service>(&query)
            .bind(source_field_id)
            .bind(target_field_id)
            .fetch_all(pool)
            .await?;

        tracing::info!(
            source_field_id,
            target_field_id,
            imported = imported.len(),
            "Imported services between activity fields",
        );
        Ok(imported)
    }
}
