//! Route definitions for the `/activity-fields` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::activity_field;
use crate::state::AppState;

/// Routes mounted at `/activity-fields`.
///
/// ```text
/// GET    /                          -> list
/// GET    /{id}                      -> get_by_id
/// POST   /{id}/default-services     -> insert_default_services
/// POST   /{id}/import-services      -> import_services
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(activity_field::list))
        .route("/{id}", get(activity_field::get_by_id))
        .route(
            "/{id}/default-services",
            post(activity_field::insert_default_services),
        )
        .route("/{id}/import-services", post(activity_field::import_services))
}
