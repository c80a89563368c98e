//! Handler for the clients-served listing.

use agenda_core::clients::{filter_clients, ClientFilter, ClientServed, DatePeriod};
use agenda_db::repositories::ClientRepo;
use axum::extract::{Query, State};
use axum::Json;
use chrono::Local;

use crate::error::AppResult;
use crate::query::ClientParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/clients?name=&period=&start=&end=
///
/// Without parameters clients come most recent visit first. Any filter
/// switches to alphabetical order.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ClientParams>,
) -> AppResult<Json<DataResponse<Vec<ClientServed>>>> {
    let clients = ClientRepo::clients_served(&state.pool).await?;
    if params.is_empty() {
        return Ok(Json(DataResponse::new(clients)));
    }

    let filter = ClientFilter {
        period: DatePeriod::parse(params.period.as_deref(), params.start, params.end)?,
        name: params.name,
    };
    let today = Local::now().date_naive();
    Ok(Json(DataResponse::new(filter_clients(clients, &filter, today))))
}
