//! Route definitions for the `/appointments` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::appointment;
use crate::state::AppState;

/// Routes mounted at `/appointments`.
///
/// ```text
/// GET    /                          -> list_pending
/// POST   /                          -> create
/// GET    /completed                 -> list_completed
/// GET    /conflicts                 -> check_slot
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// POST   /{id}/visit                -> finalize
/// GET    /{id}/notification         -> notification
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointment::list_pending).post(appointment::create))
        .route("/completed", get(appointment::list_completed))
        .route("/conflicts", get(appointment::check_slot))
        .route(
            "/{id}",
            get(appointment::get_by_id)
                .put(appointment::update)
                .delete(appointment::delete),
        )
        .route("/{id}/visit", post(appointment::finalize))
        .route("/{id}/notification", get(appointment::notification))
}
