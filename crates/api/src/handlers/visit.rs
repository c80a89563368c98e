//! Handlers for the `/visits` resource.

use agenda_core::types::DbId;
use agenda_db::models::visit::{CompletedVisit, EditVisit};
use agenda_db::repositories::VisitRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{not_found, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/visits/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompletedVisit>>> {
    let visit = VisitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Visit", id))?;
    Ok(Json(DataResponse::new(visit)))
}

/// PUT /api/v1/visits/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<EditVisit>,
) -> AppResult<Json<DataResponse<CompletedVisit>>> {
    let visit = VisitRepo::edit(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Visit", id))?;
    Ok(Json(DataResponse::new(visit)))
}

/// DELETE /api/v1/visits/{id}
///
/// The appointment goes back to pending.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if VisitRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Visit", id))
    }
}
