//! Handlers for the `/appointments` resource.
//!
//! Saving never blocks on a past slot; it only warns. A slot already held by
//! another pending appointment is refused with 409 unless the request sets
//! `allow_double_booking`.

use agenda_core::error::CoreError;
use agenda_core::lifecycle::split_service_description;
use agenda_core::notification::{render_notification, NotificationFields};
use agenda_core::scheduling::SlotCheck;
use agenda_core::slot::parse_slot;
use agenda_core::types::DbId;
use agenda_db::models::appointment::{
    Appointment, CompletedAppointmentView, CreateAppointment, PendingAppointmentView,
    UpdateAppointment,
};
use agenda_db::models::visit::{CompletedVisit, FinalizeVisit};
use agenda_db::repositories::{AppointmentRepo, SettingRepo, VisitRepo};
use agenda_db::DbPool;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Local;
use serde::Serialize;

use crate::error::{not_found, AppResult};
use crate::query::{FinalizeParams, SlotParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// A saved appointment with the warnings the operator should see.
#[derive(Debug, Serialize)]
pub struct SavedAppointment {
    pub appointment: Appointment,
    pub warnings: Vec<String>,
}

/// An appointment with its visit, if it was attended.
///
/// `selected_services` preselects the service picker: the visit's services
/// once attended, otherwise whatever was typed at booking time.
#[derive(Debug, Serialize)]
pub struct AppointmentDetail {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub visit: Option<CompletedVisit>,
    pub selected_services: Vec<String>,
}

impl AppointmentDetail {
    fn new(appointment: Appointment, visit: Option<CompletedVisit>) -> Self {
        let description = match &visit {
            Some(v) => Some(v.service_description.as_str()),
            None => appointment.service_description.as_deref(),
        };
        let selected_services = description
            .map(split_service_description)
            .unwrap_or_default();
        Self {
            appointment,
            visit,
            selected_services,
        }
    }
}

/// Outcome of the slot check.
#[derive(Debug, Serialize)]
pub struct SlotCheckResponse {
    #[serde(flatten)]
    pub check: SlotCheck,
    pub warnings: Vec<String>,
}

/// Message to send the client about their booking.
#[derive(Debug, Serialize)]
pub struct NotificationMessage {
    pub phone: String,
    pub message: String,
}

/// Check the slot and refuse a double booking the operator did not confirm.
async fn screen_slot(
    pool: &DbPool,
    input: &CreateAppointment,
    exclude_id: Option<DbId>,
) -> AppResult<Vec<String>> {
    let now = Local::now().naive_local();
    let check =
        AppointmentRepo::check_slot(pool, input.date, input.time, exclude_id, now).await?;

    if check.conflict && !input.allow_double_booking {
        return Err(CoreError::Conflict(format!(
            "Another pending appointment is booked on {} at {}",
            input.date,
            agenda_core::slot::format_slot(input.time)
        ))
        .into());
    }
    if check.conflict {
        tracing::warn!(date = %input.date, time = %input.time, "Double booking confirmed by operator");
    }
    if check.in_past {
        tracing::warn!(date = %input.date, time = %input.time, "Appointment saved in the past");
    }
    Ok(check.warnings())
}

/// POST /api/v1/appointments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateAppointment>,
) -> AppResult<(StatusCode, Json<DataResponse<SavedAppointment>>)> {
    let input = input.normalize()?;
    let warnings = screen_slot(&state.pool, &input, None).await?;
    let appointment = AppointmentRepo::create(&state.pool, &input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(SavedAppointment {
            appointment,
            warnings,
        })),
    ))
}

/// GET /api/v1/appointments
///
/// Pending appointments in chronological order.
pub async fn list_pending(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PendingAppointmentView>>>> {
    let pending = AppointmentRepo::list_pending(&state.pool).await?;
    Ok(Json(DataResponse::new(pending)))
}

/// GET /api/v1/appointments/completed
pub async fn list_completed(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CompletedAppointmentView>>>> {
    let completed = AppointmentRepo::list_completed(&state.pool).await?;
    Ok(Json(DataResponse::new(completed)))
}

/// GET /api/v1/appointments/conflicts?date=&time=&exclude_id=
pub async fn check_slot(
    State(state): State<AppState>,
    Query(params): Query<SlotParams>,
) -> AppResult<Json<DataResponse<SlotCheckResponse>>> {
    let time = parse_slot(&params.time)?;
    let now = Local::now().naive_local();
    let check =
        AppointmentRepo::check_slot(&state.pool, params.date, time, params.exclude_id, now).await?;
    let warnings = check.warnings();
    Ok(Json(DataResponse::new(SlotCheckResponse { check, warnings })))
}

/// GET /api/v1/appointments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AppointmentDetail>>> {
    let appointment = AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Appointment", id))?;
    let visit = VisitRepo::find_by_appointment(&state.pool, id).await?;
    Ok(Json(DataResponse::new(AppointmentDetail::new(appointment, visit))))
}

/// PUT /api/v1/appointments/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAppointment>,
) -> AppResult<Json<DataResponse<SavedAppointment>>> {
    let input = input.normalize()?;
    AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Appointment", id))?;

    let warnings = screen_slot(&state.pool, &input, Some(id)).await?;
    let appointment = AppointmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found("Appointment", id))?;
    Ok(Json(DataResponse::new(SavedAppointment {
        appointment,
        warnings,
    })))
}

/// DELETE /api/v1/appointments/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if AppointmentRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Appointment", id))
    }
}

/// POST /api/v1/appointments/{id}/visit?backfill=
///
/// Marks the appointment attended. `backfill` overrides the server default
/// for whether the booking is rewritten with what was performed.
pub async fn finalize(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<FinalizeParams>,
    Json(input): Json<FinalizeVisit>,
) -> AppResult<(StatusCode, Json<DataResponse<CompletedVisit>>)> {
    let policy = params
        .backfill
        .map(agenda_core::lifecycle::BackfillPolicy::from_flag)
        .unwrap_or_else(|| state.default_backfill_policy());
    let visit = VisitRepo::finalize(&state.pool, id, &input, policy).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(visit))))
}

/// GET /api/v1/appointments/{id}/notification
///
/// Renders the operator's template for this booking.
pub async fn notification(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<NotificationMessage>>> {
    let appointment = AppointmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found("Appointment", id))?;
    let template = SettingRepo::notification_template(&state.pool).await?;

    let fields = NotificationFields {
        name: Some(appointment.client_name),
        service_description: appointment.service_description,
        time: Some(appointment.time),
        date: Some(appointment.date),
    };
    Ok(Json(DataResponse::new(NotificationMessage {
        phone: appointment.client_phone,
        message: render_notification(&template, &fields),
    })))
}
