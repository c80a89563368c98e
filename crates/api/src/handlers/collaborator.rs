//! Handlers for the `/collaborators` resource.

use agenda_core::types::DbId;
use agenda_db::models::collaborator::{
    Collaborator, CreateCollaborator, SetCollaboratorServices, UpdateCollaborator,
};
use agenda_db::models::service::Service;
use agenda_db::repositories::CollaboratorRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{not_found, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/collaborators
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCollaborator>,
) -> AppResult<(StatusCode, Json<DataResponse<Collaborator>>)> {
    let input = input.normalize()?;
    let collaborator = CollaboratorRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(collaborator))))
}

/// GET /api/v1/collaborators
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Collaborator>>>> {
    let collaborators = CollaboratorRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(collaborators)))
}

/// GET /api/v1/collaborators/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Collaborator>>> {
    let collaborator = CollaboratorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Collaborator", id))?;
    Ok(Json(DataResponse::new(collaborator)))
}

/// PUT /api/v1/collaborators/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCollaborator>,
) -> AppResult<Json<DataResponse<Collaborator>>> {
    let input = input.normalize()?;
    let collaborator = CollaboratorRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Collaborator", id))?;
    Ok(Json(DataResponse::new(collaborator)))
}

/// DELETE /api/v1/collaborators/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if CollaboratorRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Collaborator", id))
    }
}

/// GET /api/v1/collaborators/{id}/services
pub async fn list_services(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    CollaboratorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Collaborator", id))?;
    let services = CollaboratorRepo::list_services(&state.pool, id).await?;
    Ok(Json(DataResponse::new(services)))
}

/// PUT /api/v1/collaborators/{id}/services
///
/// Replaces the affinity set and returns the resulting services.
pub async fn set_services(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetCollaboratorServices>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    CollaboratorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Collaborator", id))?;
    CollaboratorRepo::set_services(&state.pool, id, &input.service_ids).await?;
    let services = CollaboratorRepo::list_services(&state.pool, id).await?;
    Ok(Json(DataResponse::new(services)))
}
