//! Service configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

/// Default port of the orders service.
pub const ORDERS_PORT: u16 = 7000;
/// Default port of the payments service.
pub const PAYMENTS_PORT: u16 = 7010;
/// Default port of the deliveries service.
pub const DELIVERIES_PORT: u16 = 7020;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parses `LOG_FORMAT`; anything other than `json` means text.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: the service's own port)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `DATABASE_URL`: PostgreSQL URL; unset means in-memory storage
/// - `PG_POOL_MIN_CONN` / `PG_POOL_MAX_CONN`: pool bounds (default: 20 / 100)
/// - `PAYMENTS_URL`: base URL of the payments service
/// - `DELIVERIES_URL`: base URL of the deliveries service
/// - `REQUEST_TIMEOUT_SECS`: timeout of outgoing requests (default: 30)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
    pub pool_min_connections: u32,
    pub pool_max_connections: u32,
    pub payments_url: String,
    pub deliveries_url: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env(default_port: u16) -> Self {
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(default_port: u16, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::with_port(default_port);

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "PORT").unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or(defaults.log_format),
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            pool_min_connections: parse(&lookup, "PG_POOL_MIN_CONN")
                .unwrap_or(defaults.pool_min_connections),
            pool_max_connections: parse(&lookup, "PG_POOL_MAX_CONN")
                .unwrap_or(defaults.pool_max_connections),
            payments_url: lookup("PAYMENTS_URL").unwrap_or(defaults.payments_url),
            deliveries_url: lookup("DELIVERIES_URL").unwrap_or(defaults.deliveries_url),
            request_timeout: parse(&lookup, "REQUEST_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    /// Returns the defaults with the given port.
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: ORDERS_PORT,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            database_url: None,
            pool_min_connections: 20,
            pool_max_connections: 100,
            payments_url: format!("http://127.0.0.1:{PAYMENTS_PORT}"),
            deliveries_url: format!("http://127.0.0.1:{DELIVERIES_PORT}"),
            request_timeout: Duration::from_secs(30),
        }
    }
}

fn parse<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|value| value.parse().ok())
}
