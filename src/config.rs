//! Server settings read from the environment (after `.env` is loaded by `dotenvy`).

use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/biztime";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// Applied as `statement_timeout` on every pooled connection when set.
    pub statement_timeout: Option<Duration>,
    pub body_limit_bytes: usize,
    /// Create `companies` and `invoices` at startup if they are missing.
    pub bootstrap_schema: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let bind_addr = parse_var("BIND_ADDR", get("BIND_ADDR"))?
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));
        let max_connections =
            parse_var("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"))?.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let acquire_timeout = parse_var::<u64>("DB_ACQUIRE_TIMEOUT_SECS", get("DB_ACQUIRE_TIMEOUT_SECS"))?
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS));
        let statement_timeout =
            parse_var::<u64>("DB_STATEMENT_TIMEOUT_MS", get("DB_STATEMENT_TIMEOUT_MS"))?.map(Duration::from_millis);
        let body_limit_bytes =
            parse_var("BODY_LIMIT_BYTES", get("BODY_LIMIT_BYTES"))?.unwrap_or(DEFAULT_BODY_LIMIT_BYTES);
        let bootstrap_schema = match get("BOOTSTRAP_SCHEMA") {
            None => true,
            Some(v) => parse_bool("BOOTSTRAP_SCHEMA", &v)?,
        };

        if max_connections == 0 {
            return Err(ConfigError::InvalidVar {
                var: "DB_MAX_CONNECTIONS",
                value: "0".into(),
            });
        }

        Ok(ServerConfig {
            database_url,
            bind_addr,
            max_connections,
            acquire_timeout,
            statement_timeout,
            body_limit_bytes,
            bootstrap_schema,
        })
    }
}

fn parse_var<T: FromStr>(var: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError> {
    raw.map(|value| value.parse::<T>().map_err(|_| ConfigError::InvalidVar { var, value }))
        .transpose()
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidVar {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.max_connections, 5);
        assert_eq!(cfg.acquire_timeout, Duration::from_secs(5));
        assert_eq!(cfg.statement_timeout, None);
        assert_eq!(cfg.body_limit_bytes, 65536);
        assert!(cfg.bootstrap_schema);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config_from(&[
            ("DATABASE_URL", "postgres://db/biztime_test"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("DB_STATEMENT_TIMEOUT_MS", "2500"),
            ("BOOTSTRAP_SCHEMA", "off"),
        ])
        .unwrap();
        assert_eq!(cfg.database_url, "postgres://db/biztime_test");
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.max_connections, 12);
        assert_eq!(cfg.statement_timeout, Some(Duration::from_millis(2500)));
        assert!(!cfg.bootstrap_schema);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config_from(&[("DATABASE_URL", "  "), ("DB_MAX_CONNECTIONS", "")]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(cfg.max_connections, 5);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config_from(&[("DB_MAX_CONNECTIONS", "lots")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "DB_MAX_CONNECTIONS", .. }));

        let err = config_from(&[("BOOTSTRAP_SCHEMA", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "BOOTSTRAP_SCHEMA", .. }));

        let err = config_from(&[("DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar { var: "DB_MAX_CONNECTIONS", .. }));
    }
}
