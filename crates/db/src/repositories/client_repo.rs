//! Read-only rollup of clients with completed visits.

use agenda_core::clients::{self, ClientServed, VisitedSlot};
use agenda_core::types::Date;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct VisitedRow {
    name: String,
    phone: String,
    date: Date,
}

/// Provides the "clients served" aggregation.
pub struct ClientRepo;

impl ClientRepo {
    /// Every client with at least one completed visit and the distinct dates
    /// they were served on, most recent client first.
    pub async fn clients_served(pool: &SqlitePool) -> Result<Vec<ClientServed>, sqlx::Error> {
        let rows = sqlx::query_as::<_, VisitedRow>(
            "SELECT a.client_name AS name, a.client_phone AS phone, a.date
             FROM visits v
             JOIN appointments a ON a.id = v.appointment_id
             WHERE v.completed = 1",
        )
        .fetch_all(pool)
        .await?;

        Ok(clients::group_clients(rows.into_iter().map(|r| VisitedSlot {
            name: r.name,
            phone: r.phone,
            date: r.date,
        })))
    }
}
