//! Handler for the booking grid.

use agenda_core::slot::{all_slots, format_slot};
use axum::Json;

use crate::response::DataResponse;

/// GET /api/v1/slots
pub async fn list() -> Json<DataResponse<Vec<String>>> {
    let slots = all_slots().into_iter().map(format_slot).collect();
    Json(DataResponse::new(slots))
}
