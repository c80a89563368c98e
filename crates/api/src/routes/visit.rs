//! Route definitions for the `/visits` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::visit;
use crate::state::AppState;

/// Routes mounted at `/visits`.
///
/// ```text
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(visit::get_by_id).put(visit::update).delete(visit::delete),
    )
}
