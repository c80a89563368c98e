use agenda_db::repositories::ActivityFieldRepo;
use sqlx::SqlitePool;

/// Connect, migrate, verify the lookup tables and catalog seeding.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: SqlitePool) {
    agenda_db::health_check(&pool).await.unwrap();

    let statuses: Vec<(i64, String)> =
        sqlx::query_as("SELECT id, name FROM appointment_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(
        statuses,
        vec![(1, "pending".to_string()), (2, "attended".to_string())]
    );

    for table in [
        "activity_fields",
        "services",
        "collaborators",
        "service_collaborators",
        "appointments",
        "visits",
        "settings",
    ] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seed_catalog_is_idempotent(pool: SqlitePool) {
    let first = ActivityFieldRepo::seed_catalog(&pool).await.unwrap();
    let second = ActivityFieldRepo::seed_catalog(&pool).await.unwrap();

    assert_eq!(first as usize, agenda_core::activity_field::CATALOG.len());
    assert_eq!(second, 0);

    let fields = ActivityFieldRepo::list(&pool).await.unwrap();
    assert_eq!(fields.len(), agenda_core::activity_field::CATALOG.len());

    let pet_shop = ActivityFieldRepo::find_by_name(&pool, "Pet Shop").await.unwrap().unwrap();
    let by_id = ActivityFieldRepo::find_by_id(&pool, pet_shop.id).await.unwrap();
    assert_eq!(by_id, Some(pet_shop));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_foreign_keys_enforced(pool: SqlitePool) {
    let result = sqlx::query(
        "INSERT INTO visits (appointment_id, service_description) VALUES (999, 'Banho')",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err(), "visit for a missing appointment must be rejected");
}
