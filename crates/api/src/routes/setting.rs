//! Route definitions for operator settings.

use axum::routing::get;
use axum::Router;

use crate::handlers::setting;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET    /notification-template     -> get_template
/// PUT    /notification-template     -> put_template
/// DELETE /notification-template     -> reset_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/notification-template",
        get(setting::get_template)
            .put(setting::put_template)
            .delete(setting::reset_template),
    )
}
