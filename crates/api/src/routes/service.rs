//! Route definitions for the `/services` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::service;
use crate::state::AppState;

/// Routes mounted at `/services`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /{id}/collaborators        -> collaborators
/// GET    /{id}/appointments         -> appointments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service::list).post(service::create))
        .route(
            "/{id}",
            get(service::get_by_id)
                .put(service::update)
                .delete(service::delete),
        )
        .route("/{id}/collaborators", get(service::collaborators))
        .route("/{id}/appointments", get(service::appointments))
}
