//! Route definitions for backup and reset.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::backup;
use crate::state::AppState;

/// Routes mounted at `/backup`.
///
/// ```text
/// GET    /                          -> export
/// POST   /                          -> import   (device lock)
/// POST   /reset                     -> reset    (device lock)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(backup::export).post(backup::import))
        .route("/reset", post(backup::reset))
}
