//! "Clients served" rollup and its browse filters.
//!
//! A client is identified by the (name, phone) pair typed at booking time.
//! The rollup collects the distinct dates on which each client had a
//! completed visit.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Size of the trailing window used by [`DatePeriod::Last30Days`].
pub const TRAILING_WINDOW_DAYS: i64 = 30;

/// One completed visit reduced to what the rollup needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedSlot {
    pub name: String,
    pub phone: String,
    pub date: Date,
}

/// A client and the sorted distinct dates they were served on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientServed {
    pub name: String,
    pub phone: String,
    pub dates: Vec<Date>,
}

impl ClientServed {
    pub fn last_visit(&self) -> Option<Date> {
        self.dates.last().copied()
    }
}

/// Group visits by (name, phone).
///
/// Dates are distinct and ascending within each client. Clients are ordered
/// by most recent visit first; ties fall back to name.
pub fn group_clients<I>(rows: I) -> Vec<ClientServed>
where
    I: IntoIterator<Item = VisitedSlot>,
{
    let mut groups: BTreeMap<(String, String), BTreeSet<Date>> = BTreeMap::new();
    for row in rows {
        groups.entry((row.name, row.phone)).or_default().insert(row.date);
    }

    let mut clients: Vec<ClientServed> = groups
        .into_iter()
        .map(|((name, phone), dates)| ClientServed {
            name,
            phone,
            dates: dates.into_iter().collect(),
        })
        .collect();

    clients.sort_by(|a, b| {
        b.last_visit()
            .cmp(&a.last_visit())
            .then_with(|| a.name.cmp(&b.name))
    });
    clients
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Period predicate applied to a client's visit dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePeriod {
    #[default]
    All,
    CurrentMonth,
    /// From 30 days before today onward.
    Last30Days,
    CurrentYear,
    /// Inclusive range. A missing bound matches everything.
    Range {
        start: Option<Date>,
        end: Option<Date>,
    },
}

impl DatePeriod {
    /// Parse the `period` query value (`all`, `current_month`, `last_30_days`,
    /// `current_year`, `range`).
    pub fn parse(
        period: Option<&str>,
        start: Option<Date>,
        end: Option<Date>,
    ) -> Result<Self, CoreError> {
        match period.map(str::trim) {
            None | Some("") | Some("all") => Ok(Self::All),
            Some("current_month") => Ok(Self::CurrentMonth),
            Some("last_30_days") => Ok(Self::Last30Days),
            Some("current_year") => Ok(Self::CurrentYear),
            Some("range") => Ok(Self::Range { start, end }),
            Some(other) => Err(CoreError::Validation(format!(
                "Unknown period '{other}'"
            ))),
        }
    }

    pub fn contains(&self, date: Date, today: Date) -> bool {
        match *self {
            Self::All => true,
            Self::CurrentMonth => date.year() == today.year() && date.month() == today.month(),
            Self::Last30Days => date >= today - Duration::days(TRAILING_WINDOW_DAYS),
            Self::CurrentYear => date.year() == today.year(),
            Self::Range {
                start: Some(start),
                end: Some(end),
            } => date >= start && date <= end,
            Self::Range { .. } => true,
        }
    }
}

/// Browse-screen filter.
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    /// Case-insensitive substring of the client name.
    pub name: Option<String>,
    pub period: DatePeriod,
}

impl ClientFilter {
    pub fn matches(&self, client: &ClientServed, today: Date) -> bool {
        let name_ok = match self.name.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => client
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            _ => true,
        };
        name_ok && client.dates.iter().any(|d| self.period.contains(*d, today))
    }
}

/// Apply `filter` and sort the survivors alphabetically for display.
pub fn filter_clients(
    clients: Vec<ClientServed>,
    filter: &ClientFilter,
    today: Date,
) -> Vec<ClientServed> {
    let mut out: Vec<ClientServed> = clients
        .into_iter()
        .filter(|c| filter.matches(c, today))
        .collect();
    out.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.phone.cmp(&b.phone))
    });
    out
}
