use std::sync::Arc;

use agenda_core::lifecycle::BackfillPolicy;

use crate::auth::device_lock::DeviceLock;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: agenda_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Gate for restore and factory reset.
    pub device_lock: Arc<DeviceLock>,
}

impl AppState {
    /// Finalize policy used when a request does not choose one.
    pub fn default_backfill_policy(&self) -> BackfillPolicy {
        BackfillPolicy::from_flag(self.config.backfill_on_finalize)
    }
}
