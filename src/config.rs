use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Connection pool settings for the order store.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub connect_timeout: Duration,
    /// Applied as `statement_timeout` on every pooled connection, so a query
    /// whose caller went away is cancelled by the server. `None` leaves the
    /// server default in place.
    pub statement_timeout: Option<Duration>,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: 10,
            connect_timeout: Duration::from_secs(5),
            statement_timeout: Some(DEFAULT_STATEMENT_TIMEOUT),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub db: DbConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    ///
    /// `.env` loading is left to the caller so that it also applies to the
    /// logger setup.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 8080u16)?;

        let defaults = DbConfig::new(database_url);
        let max_pool_size = parse_or(&lookup, "DB_POOL_MAX_SIZE", defaults.max_pool_size)?;
        if max_pool_size == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_POOL_MAX_SIZE",
                value: "0".to_string(),
                reason: "pool needs at least one connection".to_string(),
            });
        }
        let connect_timeout_secs = parse_or(
            &lookup,
            "DB_CONNECT_TIMEOUT_SECS",
            defaults.connect_timeout.as_secs(),
        )?;
        // 0 disables the timeout.
        let statement_timeout_ms = parse_or(
            &lookup,
            "DB_STATEMENT_TIMEOUT_MS",
            DEFAULT_STATEMENT_TIMEOUT.as_millis() as u64,
        )?;

        Ok(Self {
            host,
            port,
            db: DbConfig {
                max_pool_size,
                connect_timeout: Duration::from_secs(connect_timeout_secs),
                statement_timeout: (statement_timeout_ms > 0)
                    .then(|| Duration::from_millis(statement_timeout_ms)),
                ..defaults
            },
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db")]))
            .expect("config should load");

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.db.database_url, "postgres://db");
        assert_eq!(config.db.max_pool_size, 10);
        assert_eq!(config.db.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.db.statement_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn zero_statement_timeout_disables_it() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("DB_STATEMENT_TIMEOUT_MS", "0"),
        ]))
        .expect("config should load");

        assert_eq!(config.db.statement_timeout, None);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DB_POOL_MAX_SIZE", "3"),
            ("DB_CONNECT_TIMEOUT_SECS", "2"),
            ("DB_STATEMENT_TIMEOUT_MS", "1500"),
        ]))
        .expect("config should load");

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.db.max_pool_size, 3);
        assert_eq!(config.db.connect_timeout, Duration::from_secs(2));
        assert_eq!(
            config.db.statement_timeout,
            Some(Duration::from_millis(1500))
        );
    }

    #[test]
    fn missing_database_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn unparsable_port_names_the_variable() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();

        match err {
            ConfigError::Invalid { var, value, .. } => {
                assert_eq!(var, "PORT");
                assert_eq!(value, "eighty");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db"),
            ("DB_POOL_MAX_SIZE", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "DB_POOL_MAX_SIZE",
                ..
            }
        ));
    }
}
