pub mod activity_field;
pub mod appointment;
pub mod backup;
pub mod client;
pub mod collaborator;
pub mod health;
pub mod service;
pub mod setting;
pub mod visit;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /slots                                           booking grid
///
/// /activity-fields                                 list
/// /activity-fields/{id}                            get
/// /activity-fields/{id}/default-services           insert catalog defaults (POST)
/// /activity-fields/{id}/import-services            copy from another field (POST)
///
/// /services                                        list (?activity_field_id), create
/// /services/{id}                                   get, update, delete (?detach_appointments)
/// /services/{id}/collaborators                     ranked by affinity
/// /services/{id}/appointments                      booked under the service name
///
/// /collaborators                                   list, create
/// /collaborators/{id}                              get, update, delete
/// /collaborators/{id}/services                     get, replace affinity set
///
/// /appointments                                    pending list, create
/// /appointments/completed                          attended list
/// /appointments/conflicts                          slot check (?date&time&exclude_id)
/// /appointments/{id}                               get, update, delete
/// /appointments/{id}/visit                         finalize (POST, ?backfill)
/// /appointments/{id}/notification                  rendered client message
///
/// /visits/{id}                                     get, edit, delete
///
/// /clients                                         clients served (?name&period&start&end)
///
/// /settings/notification-template                  get, update, reset
///
/// /backup                                          export (GET), restore (POST, device lock)
/// /backup/reset                                    factory reset (POST, device lock)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/slots", get(handlers::slot::list))
        .nest("/activity-fields", activity_field::router())
        .nest("/services", service::router())
        .nest("/collaborators", collaborator::router())
        .nest("/appointments", appointment::router())
        .nest("/visits", visit::router())
        .nest("/clients", client::router())
        .nest("/settings", setting::router())
        .nest("/backup", backup::router())
}
