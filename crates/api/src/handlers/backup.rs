//! Handlers for backup export, restore and factory reset.

use agenda_db::models::snapshot::{ImportSummary, Snapshot};
use agenda_db::repositories::BackupRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::middleware::device_lock::DeviceUnlocked;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/backup
///
/// The body is the snapshot file itself, without the data envelope.
pub async fn export(State(state): State<AppState>) -> AppResult<Json<Snapshot>> {
    let snapshot = BackupRepo::export_all(&state.pool).await?;
    tracing::info!(rows = snapshot.row_count(), "Exported snapshot");
    Ok(Json(snapshot))
}

/// POST /api/v1/backup
///
/// Replaces every table with the uploaded snapshot.
pub async fn import(
    _unlocked: DeviceUnlocked,
    State(state): State<AppState>,
    Json(document): Json<serde_json::Value>,
) -> AppResult<Json<DataResponse<ImportSummary>>> {
    let summary = BackupRepo::import_value(&state.pool, document).await?;
    Ok(Json(DataResponse::new(summary)))
}

/// POST /api/v1/backup/reset
pub async fn reset(
    _unlocked: DeviceUnlocked,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    BackupRepo::clear_all(&state.pool).await?;
    Ok(StatusCode::NO_CONTENT)
}
