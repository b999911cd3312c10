//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use weblog_infra::DatabaseConfig;

const DEFAULT_DATABASE_URL: &str = "sqlite://weblog.db?mode=rwc";
const DEFAULT_SESSION_TTL_HOURS: u64 = 24;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// `None` keeps sessions until logout or restart.
    pub session_ttl: Option<Duration>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            max_connections: parse_var("DB_MAX_CONNECTIONS").unwrap_or(10),
            min_connections: parse_var("DB_MIN_CONNECTIONS").unwrap_or(1),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT").unwrap_or(8080),
            database,
            session_ttl: session_ttl(
                parse_var("SESSION_TTL_HOURS").unwrap_or(DEFAULT_SESSION_TTL_HOURS),
            ),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

/// `0` disables expiry; an out of range value falls back to the default.
fn session_ttl(hours: u64) -> Option<Duration> {
    if hours == 0 {
        return None;
    }
    let secs = hours
        .checked_mul(3600)
        .unwrap_or(DEFAULT_SESSION_TTL_HOURS * 3600);
    Some(Duration::from_secs(secs))
}
