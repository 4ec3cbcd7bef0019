//! Service configuration
//!
//! Read once at startup from the environment (after `.env` is loaded)
//! and handed to the state constructors. Nothing reads the environment
//! after that.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HTTP_PORT: u16 = 8080;
const DEFAULT_DB_HOST: &str = "127.0.0.1";
const DEFAULT_DB_PORT: u16 = 3306;
const DEFAULT_VERIFY_TIMEOUT_SECS: u64 = 10;
/// Managed SQL instances expose their socket under this directory
const CLOUDSQL_SOCKET_DIR: &str = "/cloudsql";

/// Startup configuration errors, each naming the offending variable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Where the MySQL server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbEndpoint {
    Socket(PathBuf),
    Tcp { host: String, port: u16 },
}

/// How to reach the catalog database
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// Full `mysql://` URL (env: DATABASE_URL)
    Url(String),
    /// Individual settings (env: DB_USER, DB_PASSWORD, DB_NAME, ...)
    Credentials {
        user: String,
        password: String,
        database: String,
        endpoint: DbEndpoint,
    },
}

// Hand-written so credentials never reach the logs
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(_) => f.debug_tuple("Url").field(&"<redacted>").finish(),
            Self::Credentials {
                user,
                database,
                endpoint,
                ..
            } => f
                .debug_struct("Credentials")
                .field("user", user)
                .field("password", &"<redacted>")
                .field("database", database)
                .field("endpoint", endpoint)
                .finish(),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Catalog database target
    pub database: DatabaseConfig,
    /// Credential verification endpoint (env: TOKEN_VERIFY_URL)
    pub token_verify_url: reqwest::Url,
    /// Bound on the verification call (env: TOKEN_VERIFY_TIMEOUT_SECS)
    pub token_verify_timeout: Duration,
    /// HTTP port (env: HTTP_PORT, falling back to PORT)
    pub http_port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database = match var("DATABASE_URL") {
            Some(url) => DatabaseConfig::Url(url),
            None => {
                let endpoint = match (var("DB_SOCKET"), var("INSTANCE_CONNECTION_NAME")) {
                    (Some(path), _) => DbEndpoint::Socket(PathBuf::from(path)),
                    (None, Some(instance)) => {
                        DbEndpoint::Socket(PathBuf::from(CLOUDSQL_SOCKET_DIR).join(instance))
                    }
                    (None, None) => DbEndpoint::Tcp {
                        host: var("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.into()),
                        port: parse_or("DB_PORT", var("DB_PORT"), DEFAULT_DB_PORT)?,
                    },
                };
                DatabaseConfig::Credentials {
                    user: var("DB_USER").ok_or(ConfigError::Missing("DB_USER"))?,
                    // an empty password is a valid MySQL account setting
                    password: lookup("DB_PASSWORD").unwrap_or_default(),
                    database: var("DB_NAME").ok_or(ConfigError::Missing("DB_NAME"))?,
                    endpoint,
                }
            }
        };

        let raw_url = var("TOKEN_VERIFY_URL").ok_or(ConfigError::Missing("TOKEN_VERIFY_URL"))?;
        let token_verify_url = reqwest::Url::parse(&raw_url).map_err(|e| ConfigError::Invalid {
            var: "TOKEN_VERIFY_URL",
            reason: e.to_string(),
        })?;

        let timeout_secs = parse_or(
            "TOKEN_VERIFY_TIMEOUT_SECS",
            var("TOKEN_VERIFY_TIMEOUT_SECS"),
            DEFAULT_VERIFY_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "TOKEN_VERIFY_TIMEOUT_SECS",
                reason: "must be greater than zero".into(),
            });
        }

        let http_port = match var("HTTP_PORT") {
            Some(port) => parse_or("HTTP_PORT", Some(port), DEFAULT_HTTP_PORT)?,
            None => parse_or("PORT", var("PORT"), DEFAULT_HTTP_PORT)?,
        };

        Ok(Self {
            database,
            token_verify_url,
            token_verify_timeout: Duration::from_secs(timeout_secs),
            http_port,
        })
    }
}

/// Log output format (env: LOG_FORMAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    const VERIFY: (&str, &str) = ("TOKEN_VERIFY_URL", "https://verify.example.com/");

    #[test]
    fn test_database_url_wins() {
        let cfg = config(&[
            ("DATABASE_URL", "mysql://u:p@db/catalog"),
            ("DB_USER", "ignored"),
            VERIFY,
        ])
        .unwrap();
        assert_eq!(
            cfg.database,
            DatabaseConfig::Url("mysql://u:p@db/catalog".into())
        );
        assert_eq!(cfg.http_port, 8080);
        assert_eq!(cfg.token_verify_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_instance_connection_name_becomes_socket() {
        let cfg = config(&[
            ("DB_USER", "franja"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "catalog"),
            ("INSTANCE_CONNECTION_NAME", "project:region:instance"),
            VERIFY,
        ])
        .unwrap();
        match cfg.database {
            DatabaseConfig::Credentials { endpoint, .. } => assert_eq!(
                endpoint,
                DbEndpoint::Socket(PathBuf::from("/cloudsql/project:region:instance"))
            ),
            other => panic!("unexpected database config: {other:?}"),
        }
    }

    #[test]
    fn test_tcp_defaults() {
        let cfg = config(&[("DB_USER", "u"), ("DB_NAME", "n"), VERIFY]).unwrap();
        match cfg.database {
            DatabaseConfig::Credentials {
                password, endpoint, ..
            } => {
                assert_eq!(password, "");
                assert_eq!(
                    endpoint,
                    DbEndpoint::Tcp {
                        host: "127.0.0.1".into(),
                        port: 3306
                    }
                );
            }
            other => panic!("unexpected database config: {other:?}"),
        }
    }

    #[test]
    fn test_missing_variables_are_named() {
        assert_eq!(
            config(&[("DB_NAME", "n"), VERIFY]).unwrap_err(),
            ConfigError::Missing("DB_USER")
        );
        assert_eq!(
            config(&[("DATABASE_URL", "mysql://db/n")]).unwrap_err(),
            ConfigError::Missing("TOKEN_VERIFY_URL")
        );
    }

    #[test]
    fn test_invalid_numbers_are_named() {
        let err = config(&[
            ("DATABASE_URL", "mysql://db/n"),
            VERIFY,
            ("PORT", "eighty"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));

        let err = config(&[
            ("DATABASE_URL", "mysql://db/n"),
            VERIFY,
            ("TOKEN_VERIFY_TIMEOUT_SECS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "TOKEN_VERIFY_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn test_http_port_overrides_port() {
        let cfg = config(&[
            ("DATABASE_URL", "mysql://db/n"),
            VERIFY,
            ("HTTP_PORT", "3001"),
            ("PORT", "9000"),
        ])
        .unwrap();
        assert_eq!(cfg.http_port, 3001);
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let cfg = config(&[
            ("DB_USER", "u"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "n"),
            VERIFY,
        ])
        .unwrap();
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("hunter2"));

        let cfg = config(&[("DATABASE_URL", "mysql://u:hunter2@db/n"), VERIFY]).unwrap();
        assert!(!format!("{cfg:?}").contains("hunter2"));
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse(Some("JSON")), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("pretty")), LogFormat::Text);
        assert_eq!(LogFormat::parse(None), LogFormat::Text);
    }
}
