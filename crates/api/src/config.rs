use std::str::FromStr;

use anyhow::Context;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for running on the operator's own
/// machine.
#[derive(Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// SQLite database URL.
    pub database_url: String,
    /// Connection pool size (default: `5`).
    pub db_max_connections: u32,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PIN guarding restore and reset. `None` leaves them open.
    pub device_pin: Option<String>,
    /// Whether finalizing a visit rewrites the appointment by default.
    pub backfill_on_finalize: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                       |
    /// |------------------------|-------------------------------|
    /// | `HOST`                 | `127.0.0.1`                   |
    /// | `PORT`                 | `3000`                        |
    /// | `DATABASE_URL`         | `sqlite://./data/agenda.db`   |
    /// | `DB_MAX_CONNECTIONS`   | `5`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:8081`       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                          |
    /// | `DEVICE_PIN`           | unset                         |
    /// | `BACKFILL_ON_FINALIZE` | `true`                        |
    pub fn from_env() -> anyhow::Result<Self> {
        let cors_origins: Vec<String> = var_or("CORS_ORIGINS", "http://localhost:8081")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let device_pin = std::env::var("DEVICE_PIN")
            .ok()
            .map(|pin| pin.trim().to_string())
            .filter(|pin| !pin.is_empty());

        Ok(Self {
            host: var_or("HOST", "127.0.0.1"),
            port: parse_var("PORT", "3000")?,
            database_url: var_or("DATABASE_URL", "sqlite://./data/agenda.db"),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "5")?,
            cors_origins,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30")?,
            device_pin,
            backfill_on_finalize: parse_var("BACKFILL_ON_FINALIZE", "true")?,
        })
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("cors_origins", &self.cors_origins)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("device_pin", &self.device_pin.as_ref().map(|_| "<redacted>"))
            .field("backfill_on_finalize", &self.backfill_on_finalize)
            .finish()
    }
}

fn var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = var_or(key, default);
    raw.trim()
        .parse()
        .with_context(|| format!("{key} has an invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_var_falls_back_to_default() {
        let port: u16 = parse_var("AGENDA_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
        let flag: bool = parse_var("AGENDA_TEST_UNSET_FLAG", "true").unwrap();
        assert!(flag);
    }

    #[test]
    fn parse_var_reports_the_key() {
        let err = parse_var::<u16>("AGENDA_TEST_UNSET_BAD", "not-a-port").unwrap_err();
        assert!(err.to_string().contains("AGENDA_TEST_UNSET_BAD"));
    }

    #[test]
    fn debug_hides_the_pin() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            database_url: "sqlite::memory:".into(),
            db_max_connections: 1,
            cors_origins: vec![],
            request_timeout_secs: 30,
            device_pin: Some("4321".into()),
            backfill_on_finalize: true,
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("4321"));
        assert!(printed.contains("<redacted>"));
    }
}
