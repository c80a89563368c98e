//! Integration tests for the clients-served rollup and settings.

use agenda_core::clients::{filter_clients, ClientFilter, DatePeriod};
use agenda_core::lifecycle::BackfillPolicy;
use agenda_core::notification::DEFAULT_TEMPLATE;
use agenda_db::models::appointment::CreateAppointment;
use agenda_db::models::setting::KEY_NOTIFICATION_TEMPLATE;
use agenda_db::models::visit::FinalizeVisit;
use agenda_db::repositories::{AppointmentRepo, ClientRepo, SettingRepo, VisitRepo};
use chrono::{NaiveDate, NaiveTime};
use sqlx::SqlitePool;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

async fn visit(pool: &SqlitePool, name: &str, phone: &str, date: NaiveDate, attend: bool) {
    let appt = AppointmentRepo::create(
        pool,
        &CreateAppointment {
            client_name: name.to_string(),
            client_phone: phone.to_string(),
            service_description: None,
            date,
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            collaborator_id: None,
            allow_double_booking: true,
        },
    )
    .await
    .unwrap();
    if attend {
        VisitRepo::finalize(
            pool,
            appt.id,
            &FinalizeVisit {
                service_names: vec!["Banho".to_string()],
                collaborator_id: None,
            },
            BackfillPolicy::Backfill,
        )
        .await
        .unwrap();
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_clients_served_grouping(pool: SqlitePool) {
    visit(&pool, "Ana", "11999990000", date(3, 10), true).await;
    visit(&pool, "Ana", "11999990000", date(1, 5), true).await;
    visit(&pool, "Ana", "11999990000", date(3, 10), true).await;
    visit(&pool, "Ana", "11911112222", date(2, 1), true).await;
    visit(&pool, "Bia", "11988880000", date(4, 2), true).await;
    visit(&pool, "Caio", "11977770000", date(5, 1), false).await;

    let clients = ClientRepo::clients_served(&pool).await.unwrap();
    assert_eq!(clients.len(), 3, "same name with another phone is another client");
    assert_eq!(clients[0].name, "Bia");
    assert_eq!(clients[1].name, "Ana");
    assert_eq!(clients[1].phone, "11999990000");
    assert_eq!(clients[1].dates, vec![date(1, 5), date(3, 10)]);
    assert!(clients.iter().all(|c| c.name != "Caio"), "pending only is not served");

    let filter = ClientFilter {
        name: Some("an".to_string()),
        period: DatePeriod::Range {
            start: Some(date(3, 1)),
            end: Some(date(3, 31)),
        },
    };
    let filtered = filter_clients(clients, &filter, date(6, 1));
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].phone, "11999990000");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_notification_template_setting(pool: SqlitePool) {
    assert_eq!(SettingRepo::notification_template(&pool).await.unwrap(), DEFAULT_TEMPLATE);

    SettingRepo::set(&pool, KEY_NOTIFICATION_TEMPLATE, "Oi ${name}").await.unwrap();
    let stored = SettingRepo::set(&pool, KEY_NOTIFICATION_TEMPLATE, "Olá ${name}!").await.unwrap();
    assert_eq!(stored.value, "Olá ${name}!");
    assert_eq!(SettingRepo::notification_template(&pool).await.unwrap(), "Olá ${name}!");

    assert!(SettingRepo::delete(&pool, KEY_NOTIFICATION_TEMPLATE).await.unwrap());
    assert!(!SettingRepo::delete(&pool, KEY_NOTIFICATION_TEMPLATE).await.unwrap());
    assert_eq!(SettingRepo::notification_template(&pool).await.unwrap(), DEFAULT_TEMPLATE);
}
