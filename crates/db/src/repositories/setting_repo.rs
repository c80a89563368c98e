//! Repository for the `settings` key/value table.

use agenda_core::notification::DEFAULT_TEMPLATE;
use sqlx::SqlitePool;

use crate::models::setting::{Setting, KEY_NOTIFICATION_TEMPLATE};

/// Provides access to operator settings.
pub struct SettingRepo;

impl SettingRepo {
    pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<Setting>, sqlx::Error> {
        sqlx::query_as::<_, Setting>("SELECT key, value, updated_at FROM settings WHERE key = $1")
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace a setting, returning the stored row.
    pub async fn set(pool: &SqlitePool, key: &str, value: &str) -> Result<Setting, sqlx::Error> {
        sqlx::query_as::<_, Setting>(
            "INSERT INTO settings (key, value) VALUES ($1, $2)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
             RETURNING key, value, updated_at",
        )
        .bind(key)
        .bind(value)
        .fetch_one(pool)
        .await
    }

    /// Remove a setting. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, key: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM settings WHERE key = $1")
            .bind(key)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The operator's notification template, or the built-in default.
    pub async fn notification_template(pool: &SqlitePool) -> Result<String, sqlx::Error> {
        Ok(Self::get(pool, KEY_NOTIFICATION_TEMPLATE)
            .await?
            .map(|s| s.value)
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()))
    }
}
