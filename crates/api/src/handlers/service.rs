//! Handlers for the `/services` resource.

use agenda_core::types::DbId;
use agenda_db::models::appointment::Appointment;
use agenda_db::models::collaborator::RankedCollaborator;
use agenda_db::models::service::{CreateService, Service, UpdateService};
use agenda_db::repositories::{AppointmentRepo, CollaboratorRepo, ServiceRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{not_found, AppResult};
use crate::query::{ActivityFieldParams, DeleteServiceParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a delete that also detached appointments.
#[derive(Debug, Serialize)]
pub struct DetachedDelete {
    pub id: DbId,
    pub detached_appointments: u64,
}

/// POST /api/v1/services
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateService>,
) -> AppResult<(StatusCode, Json<DataResponse<Service>>)> {
    let input = input.normalize()?;
    let service = ServiceRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(service))))
}

/// GET /api/v1/services?activity_field_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ActivityFieldParams>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list(&state.pool, params.activity_field_id).await?;
    Ok(Json(DataResponse::new(services)))
}

/// GET /api/v1/services/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Service>>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Service", id))?;
    Ok(Json(DataResponse::new(service)))
}

/// PUT /api/v1/services/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateService>,
) -> AppResult<Json<DataResponse<Service>>> {
    let input = input.normalize()?;
    let service = ServiceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Service", id))?;
    Ok(Json(DataResponse::new(service)))
}

/// DELETE /api/v1/services/{id}?detach_appointments=
///
/// Plain deletion answers 204. With `detach_appointments=true` the
/// appointments booked under the service name lose their service text and
/// the count is returned.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<DeleteServiceParams>,
) -> AppResult<Response> {
    if params.detach_appointments {
        let detached = ServiceRepo::delete_detaching_appointments(&state.pool, id)
            .await?
            .ok_or_else(|| not_found("Service", id))?;
        let body = DataResponse::new(DetachedDelete {
            id,
            detached_appointments: detached,
        });
        return Ok(Json(body).into_response());
    }

    if ServiceRepo::delete(&state.pool, id).await? {
        tracing::info!(service_id = id, "Deleted service");
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(not_found("Service", id))
    }
}

/// GET /api/v1/services/{id}/collaborators
///
/// Every collaborator, those with affinity for the service first.
pub async fn collaborators(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<RankedCollaborator>>>> {
    ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Service", id))?;
    let ranked = CollaboratorRepo::ranked_for_service(&state.pool, id).await?;
    Ok(Json(DataResponse::new(ranked)))
}

/// GET /api/v1/services/{id}/appointments
///
/// Appointments booked under the service's name; shown before a detaching
/// delete.
pub async fn appointments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Appointment>>>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Service", id))?;
    let linked = AppointmentRepo::linked_to_service(&state.pool, &service.name).await?;
    Ok(Json(DataResponse::new(linked)))
}
