//! Connection pool construction and the `companies` / `invoices` DDL.

use crate::config::ServerConfig;
use crate::error::AppError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use std::str::FromStr;

/// Invoices cascade with their company: deleting a company removes its invoices.
const SCHEMA_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS companies (
        code TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS invoices (
        id SERIAL PRIMARY KEY,
        comp_code TEXT NOT NULL REFERENCES companies (code) ON DELETE CASCADE,
        amt NUMERIC(10, 2) NOT NULL CHECK (amt > 0),
        paid BOOLEAN NOT NULL DEFAULT false,
        add_date DATE NOT NULL DEFAULT CURRENT_DATE,
        paid_date DATE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS invoices_comp_code_idx ON invoices (comp_code)",
];

/// Connect options for `config.database_url`, with `statement_timeout` set when configured.
pub fn connect_options(config: &ServerConfig) -> Result<PgConnectOptions, AppError> {
    let mut opts = PgConnectOptions::from_str(&config.database_url)?;
    if let Some(timeout) = config.statement_timeout {
        opts = opts.options([("statement_timeout", timeout.as_millis().to_string())]);
    }
    Ok(opts)
}

/// Build the shared pool. Connects eagerly so a bad `DATABASE_URL` fails startup.
pub async fn create_pool(config: &ServerConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options(config)?)
        .await?;
    Ok(pool)
}

/// Create both tables if missing. Idempotent; existing tables are left untouched.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::debug!("schema ensured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn config(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap()
    }

    #[test]
    fn connect_options_follow_database_url() {
        let cfg = config(&[("DATABASE_URL", "postgres://app@db.internal:6543/ledger")]);
        let opts = connect_options(&cfg).unwrap();
        assert_eq!(opts.get_host(), "db.internal");
        assert_eq!(opts.get_port(), 6543);
        assert_eq!(opts.get_database(), Some("ledger"));
    }

    #[test]
    fn statement_timeout_is_passed_as_connection_option() {
        let cfg = config(&[("DB_STATEMENT_TIMEOUT_MS", "1500")]);
        assert_eq!(cfg.statement_timeout, Some(Duration::from_millis(1500)));
        let opts = connect_options(&cfg).unwrap();
        assert_eq!(opts.get_options(), Some("-c statement_timeout=1500"));
    }

    #[test]
    fn malformed_database_url_is_rejected() {
        let cfg = config(&[("DATABASE_URL", "not a url")]);
        assert!(connect_options(&cfg).is_err());
    }
}
