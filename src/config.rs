//! Configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Server settings are read once at
//! startup. Database settings are read per invocation, at connection time,
//! and every `POSTGRES_*` connection parameter is mandatory.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Default bound on establishing a database connection.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Configuration failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty.
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("invalid value for {key}: {value:?}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value that failed to parse.
        value: String,
    },
}

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Host process configuration.
///
/// Loaded once at startup via [`ServerConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Log line format.
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Loads server configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file, so
    /// the `POSTGRES_*` variables read later by [`DatabaseConfig::from_env`]
    /// may come from it as well.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `LISTEN_ADDR` or `LOG_FORMAT` is
    /// set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds server configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                key: "LISTEN_ADDR",
                value: raw,
            })?,
            None => SocketAddr::from(([0, 0, 0, 0], 3000)),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") | Some("TEXT") => LogFormat::Text,
            Some("json") | Some("JSON") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value: other.to_string(),
                });
            }
        };

        Ok(Self {
            listen_addr,
            log_format,
        })
    }
}

/// PostgreSQL connection parameters.
///
/// There are no defaults for the connection parameters themselves: a
/// missing variable is an error, never a fallback to a baked-in value.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Database name (`POSTGRES_DB`).
    pub database: String,
    /// Role to authenticate as (`POSTGRES_USER`).
    pub user: String,
    /// Password for `user` (`POSTGRES_PASSWORD`).
    pub password: String,
    /// Server host name or address (`POSTGRES_HOST`).
    pub host: String,
    /// Server port (`POSTGRES_PORT`).
    pub port: u16,
    /// Bound on establishing the connection (`POSTGRES_CONNECT_TIMEOUT_SECS`).
    pub connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Reads the connection parameters from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] if any of `POSTGRES_DB`,
    /// `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_HOST` or
    /// `POSTGRES_PORT` is unset or empty, and [`ConfigError::Invalid`] if
    /// the port or timeout does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds connection parameters from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`DatabaseConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let database = required("POSTGRES_DB")?;
        let user = required("POSTGRES_USER")?;
        let password = required("POSTGRES_PASSWORD")?;
        let host = required("POSTGRES_HOST")?;
        let port = parse_value("POSTGRES_PORT", required("POSTGRES_PORT")?)?;

        let connect_timeout_secs = match lookup("POSTGRES_CONNECT_TIMEOUT_SECS") {
            Some(raw) if !raw.is_empty() => parse_value("POSTGRES_CONNECT_TIMEOUT_SECS", raw)?,
            _ => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        Ok(Self {
            database,
            user,
            password,
            host,
            port,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
        })
    }

    /// Converts the parameters into sqlx connect options.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .application_name(env!("CARGO_PKG_NAME"))
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn full_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("POSTGRES_DB", "contacts"),
            ("POSTGRES_USER", "writer"),
            ("POSTGRES_PASSWORD", "s3cret"),
            ("POSTGRES_HOST", "db.internal"),
            ("POSTGRES_PORT", "5433"),
        ]
    }

    #[test]
    fn database_config_reads_all_parameters() {
        let Ok(cfg) = DatabaseConfig::from_lookup(lookup_from(&full_env())) else {
            panic!("expected a valid config");
        };
        assert_eq!(cfg.database, "contacts");
        assert_eq!(cfg.user, "writer");
        assert_eq!(cfg.password, "s3cret");
        assert_eq!(cfg.host, "db.internal");
        assert_eq!(cfg.port, 5433);
        assert_eq!(
            cfg.connect_timeout,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn each_connection_parameter_is_required() {
        for key in [
            "POSTGRES_DB",
            "POSTGRES_USER",
            "POSTGRES_PASSWORD",
            "POSTGRES_HOST",
            "POSTGRES_PORT",
        ] {
            let env: Vec<_> = full_env().into_iter().filter(|(k, _)| *k != key).collect();
            let result = DatabaseConfig::from_lookup(lookup_from(&env));
            assert_eq!(result, Err(ConfigError::Missing(key)), "{key}");
        }
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let env: Vec<_> = full_env()
            .into_iter()
            .map(|(k, v)| if k == "POSTGRES_HOST" { (k, "") } else { (k, v) })
            .collect();
        let result = DatabaseConfig::from_lookup(lookup_from(&env));
        assert_eq!(result, Err(ConfigError::Missing("POSTGRES_HOST")));
    }

    #[test]
    fn non_numeric_port_is_invalid() {
        let mut env: Vec<_> = full_env()
            .into_iter()
            .filter(|(k, _)| *k != "POSTGRES_PORT")
            .collect();
        env.push(("POSTGRES_PORT", "POSTGRES_PORT"));
        let result = DatabaseConfig::from_lookup(lookup_from(&env));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                key: "POSTGRES_PORT",
                ..
            })
        ));
    }

    #[test]
    fn connect_timeout_is_overridable() {
        let mut env = full_env();
        env.push(("POSTGRES_CONNECT_TIMEOUT_SECS", "12"));
        let Ok(cfg) = DatabaseConfig::from_lookup(lookup_from(&env)) else {
            panic!("expected a valid config");
        };
        assert_eq!(cfg.connect_timeout, Duration::from_secs(12));
    }

    #[test]
    fn debug_output_redacts_password() {
        let Ok(cfg) = DatabaseConfig::from_lookup(lookup_from(&full_env())) else {
            panic!("expected a valid config");
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn server_config_defaults() {
        let Ok(cfg) = ServerConfig::from_lookup(lookup_from(&[])) else {
            panic!("expected defaults");
        };
        assert_eq!(cfg.listen_addr, SocketAddr::from(([0, 0, 0, 0], 3000)));
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn server_config_rejects_bad_values() {
        let bad_addr = ServerConfig::from_lookup(lookup_from(&[("LISTEN_ADDR", "nowhere")]));
        assert!(bad_addr.is_err());

        let bad_format = ServerConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")]));
        assert!(bad_format.is_err());

        let Ok(json) = ServerConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "json")])) else {
            panic!("json is a valid format");
        };
        assert_eq!(json.log_format, LogFormat::Json);
    }
}
