//! Handlers for the `/activity-fields` resource.

use agenda_core::error::CoreError;
use agenda_core::types::DbId;
use agenda_db::models::activity_field::{ActivityField, ImportServices};
use agenda_db::models::service::Service;
use agenda_db::repositories::{ActivityFieldRepo, ServiceRepo};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{not_found, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activity-fields
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<ActivityField>>>> {
    let fields = ActivityFieldRepo::list(&state.pool).await?;
    Ok(Json(DataResponse::new(fields)))
}

/// GET /api/v1/activity-fields/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ActivityField>>> {
    let field = ActivityFieldRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("ActivityField", id))?;
    Ok(Json(DataResponse::new(field)))
}

/// POST /api/v1/activity-fields/{id}/default-services
///
/// Responds with the services that were actually inserted.
pub async fn insert_default_services(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Service>>>)> {
    let field = ActivityFieldRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("ActivityField", id))?;
    let inserted = ServiceRepo::insert_defaults(&state.pool, &field).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(inserted))))
}

/// POST /api/v1/activity-fields/{id}/import-services
pub async fn import_services(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ImportServices>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Service>>>)> {
    if input.source_field_id == id {
        return Err(CoreError::Validation(
            "Source and target activity fields must differ".into(),
        )
        .into());
    }
    for field_id in [id, input.source_field_id] {
        ActivityFieldRepo::find_by_id(&state.pool, field_id)
            .await?
            .ok_or_else(|| not_found("ActivityField", field_id))?;
    }

    let imported = ServiceRepo::import_from_field(&state.pool, input.source_field_id, id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(imported))))
}
