//! Route definitions for the `/clients` listing.

use axum::routing::get;
use axum::Router;

use crate::handlers::client;
use crate::state::AppState;

/// Routes mounted at `/clients`.
///
/// ```text
/// GET    /                          -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(client::list))
}
