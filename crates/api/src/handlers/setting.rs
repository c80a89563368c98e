//! Handlers for the notification template setting.

use agenda_core::notification::{normalize_template, DEFAULT_TEMPLATE};
use agenda_db::models::setting::KEY_NOTIFICATION_TEMPLATE;
use agenda_db::repositories::SettingRepo;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TemplateResponse {
    pub template: String,
    pub is_default: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTemplate {
    pub template: String,
}

/// GET /api/v1/settings/notification-template
pub async fn get_template(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<TemplateResponse>>> {
    let stored = SettingRepo::get(&state.pool, KEY_NOTIFICATION_TEMPLATE).await?;
    let response = match stored {
        Some(setting) => TemplateResponse {
            template: setting.value,
            is_default: false,
        },
        None => TemplateResponse {
            template: DEFAULT_TEMPLATE.to_string(),
            is_default: true,
        },
    };
    Ok(Json(DataResponse::new(response)))
}

/// PUT /api/v1/settings/notification-template
pub async fn put_template(
    State(state): State<AppState>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<Json<DataResponse<TemplateResponse>>> {
    let template = normalize_template(&input.template)?;
    let setting = SettingRepo::set(&state.pool, KEY_NOTIFICATION_TEMPLATE, &template).await?;
    Ok(Json(DataResponse::new(TemplateResponse {
        template: setting.value,
        is_default: false,
    })))
}

/// DELETE /api/v1/settings/notification-template
///
/// Restores the built-in template.
pub async fn reset_template(State(state): State<AppState>) -> AppResult<StatusCode> {
    SettingRepo::delete(&state.pool, KEY_NOTIFICATION_TEMPLATE).await?;
    Ok(StatusCode::NO_CONTENT)
}
