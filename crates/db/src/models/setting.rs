//! Key/value operator settings.

use serde::Serialize;
use sqlx::FromRow;

/// Key under which the client notification template is stored.
pub const KEY_NOTIFICATION_TEMPLATE: &str = "notification_template";

/// A row from the `settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
