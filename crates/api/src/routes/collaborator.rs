//! Route definitions for the `/collaborators` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::collaborator;
use crate::state::AppState;

/// Routes mounted at `/collaborators`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /{id}/services             -> list_services
/// PUT    /{id}/services             -> set_services
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(collaborator::list).post(collaborator::create))
        .route(
            "/{id}",
            get(collaborator::get_by_id)
                .put(collaborator::update)
                .delete(collaborator::delete),
        )
        .route(
            "/{id}/services",
            get(collaborator::list_services).put(collaborator::set_services),
        )
}
