//! Repository for the `activity_fields` table.

use agenda_core::activity_field::CATALOG;
use agenda_core::types::DbId;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::activity_field::ActivityField;

/// Provides lookups and catalog seeding for business sectors.
pub struct ActivityFieldRepo;

impl ActivityFieldRepo {
    /// Insert any catalog sector that is not present yet.
    ///
    /// Returns the number of sectors inserted. Safe to run on every start.
    pub async fn seed_catalog(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let inserted = Self::seed_catalog_in(&mut tx).await?;
        tx.commit().await?;
        if inserted > 0 {
            tracing::info!(inserted, "Seeded activity field catalog");
        }
        Ok(inserted)
    }

    /// Seed the catalog inside an existing transaction.
    pub async fn seed_catalog_in(tx: &mut Transaction<'_, Sqlite>) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for field in CATALOG {
            let result = sqlx::query("INSERT OR IGNORE INTO activity_fields (name) VALUES ($1)")
                .bind(field.name)
                .execute(&mut **tx)
                .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// List all sectors alphabetically.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<ActivityField>, sqlx::Error> {
        sqlx::query_as::<_, ActivityField>("SELECT id, name FROM activity_fields ORDER BY name")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<ActivityField>, sqlx::Error> {
        sqlx::query_as::<_, ActivityField>("SELECT id, name FROM activity_fields WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_name(
        pool: &SqlitePool,
        name: &str,
    ) -> Result<Option<ActivityField>, sqlx::Error> {
        sqlx::query_as::<_, ActivityField>("SELECT id, name FROM activity_fields WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
