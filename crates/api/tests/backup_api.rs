//! HTTP-level integration tests for the clients listing, backup restore
//! and the device lock guarding it.

mod common;

use agenda_db::repositories::ActivityFieldRepo;
use axum::http::StatusCode;
use common::{body_json, book, get, post_json, post_json_with_pin};
use serde_json::json;
use sqlx::SqlitePool;

async fn attend(pool: &SqlitePool, appointment_id: i64, service: &str) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/appointments/{appointment_id}/visit"),
        json!({"service_names": [service], "collaborator_id": null}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn export(pool: &SqlitePool) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/backup").await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clients_served(pool: SqlitePool) {
    let ana = book(&pool, "Ana", "2024-03-10", "09:00").await;
    let bruno = book(&pool, "Bruno", "2024-04-01", "10:00").await;
    book(&pool, "Carla", "2024-04-02", "10:00").await;
    attend(&pool, ana, "Banho").await;
    attend(&pool, bruno, "Tosa").await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/clients").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bruno", "Ana"], "pending clients are not listed");
    assert_eq!(json["data"][1]["dates"], json!(["2024-03-10"]));

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/clients?name=an").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["name"], "Ana");

    let app = common::build_test_app(pool.clone());
    let json = body_json(
        get(app, "/api/v1/clients?period=range&start=2024-03-15&end=2024-12-31").await,
    )
    .await;
    assert_eq!(json["data"][0]["name"], "Bruno");
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/clients?period=weekly").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_export_import_round_trip(pool: SqlitePool) {
    ActivityFieldRepo::seed_catalog(&pool).await.unwrap();
    let first = book(&pool, "Ana", "2099-05-20", "10:00").await;
    book(&pool, "Bia", "2099-05-21", "11:00").await;
    attend(&pool, first, "Banho").await;
    let app = common::build_test_app(pool.clone());
    common::put_json(
        app,
        "/api/v1/settings/notification-template",
        json!({"template": "Oi ${name}!"}),
    )
    .await;

    let snapshot = export(&pool).await;
    assert_eq!(snapshot["appointmentText"], "Oi ${name}!");
    assert_eq!(snapshot["appointments"].as_array().unwrap().len(), 2);
    assert_eq!(snapshot["atendimentos"].as_array().unwrap().len(), 1);
    assert!(snapshot.get("data").is_none(), "export is the bare file");

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/backup", snapshot.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await;
    assert_eq!(summary["data"]["appointments"], 2);
    assert_eq!(summary["data"]["visits"], 1);

    assert_eq!(export(&pool).await, snapshot);

    let app = common::build_test_app(pool);
    let pending = body_json(get(app, "/api/v1/appointments").await).await;
    assert_eq!(pending["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_incomplete_snapshot_rejected(pool: SqlitePool) {
    let id = book(&pool, "Ana", "2099-05-20", "10:00").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/backup",
        json!({"appointments": [], "services": []}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/appointments/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK, "store left untouched");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_restore_requires_device_pin(pool: SqlitePool) {
    book(&pool, "Ana", "2099-05-20", "10:00").await;
    let snapshot = export(&pool).await;

    for pin in [None, Some("0000")] {
        let app = common::build_locked_test_app(pool.clone());
        let response = post_json_with_pin(app, "/api/v1/backup", snapshot.clone(), pin).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["code"], "FORBIDDEN");
    }

    let app = common::build_locked_test_app(pool);
    let response =
        post_json_with_pin(app, "/api/v1/backup", snapshot, Some(common::TEST_PIN)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_clears_and_reseeds(pool: SqlitePool) {
    book(&pool, "Ana", "2099-05-20", "10:00").await;

    let app = common::build_locked_test_app(pool.clone());
    let response = post_json_with_pin(app, "/api/v1/backup/reset", json!({}), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_locked_test_app(pool.clone());
    let response =
        post_json_with_pin(app, "/api/v1/backup/reset", json!({}), Some(common::TEST_PIN)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let snapshot = export(&pool).await;
    assert_eq!(snapshot["appointments"], json!([]));
    assert!(!snapshot["activityFields"].as_array().unwrap().is_empty());
    assert!(snapshot.get("appointmentText").is_none());
}
