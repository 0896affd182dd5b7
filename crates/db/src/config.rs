//! Store connection configuration.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Errors raised while reading database configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("{0} must be set (or provide DATABASE_URL)")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where the pool connects to.
#[derive(Clone)]
pub enum ConnectionTarget {
    /// A full `postgres://` connection string.
    Url(String),
    /// Discrete connection parameters.
    Discrete {
        host: String,
        port: u16,
        user: String,
        password: String,
        database: String,
    },
}

// Credentials never reach the logs.
impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(_) => f.write_str("Url(<redacted>)"),
            Self::Discrete {
                host,
                port,
                user,
                database,
                ..
            } => f
                .debug_struct("Discrete")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("database", database)
                .finish_non_exhaustive(),
        }
    }
}

/// Database pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub target: ConnectionTarget,
    /// Maximum pooled connections (default: `20`).
    pub max_connections: u32,
    /// How long a request waits for a free connection (default: `5`).
    pub acquire_timeout_secs: u64,
    /// Server-side per-statement timeout in milliseconds (default: `10000`).
    pub statement_timeout_ms: u64,
}

impl DbConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` wins when set; otherwise the discrete variables are
    /// read.
    ///
    /// | Env Var                   | Default  |
    /// |---------------------------|----------|
    /// | `DATABASE_URL`            | unset    |
    /// | `DB_HOST`                 | required |
    /// | `DB_PORT`                 | `5432`   |
    /// | `DB_USER`                 | required |
    /// | `DB_PASS`                 | empty    |
    /// | `DB_NAME`                 | required |
    /// | `DB_MAX_CONNECTIONS`      | `20`     |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`      |
    /// | `DB_STATEMENT_TIMEOUT_MS` | `10000`  |
    pub fn from_env() -> Result<Self, DbConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DbConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let target = match non_empty("DATABASE_URL") {
            Some(url) => ConnectionTarget::Url(url),
            None => ConnectionTarget::Discrete {
                host: non_empty("DB_HOST").ok_or(DbConfigError::Missing("DB_HOST"))?,
                port: parse_or("DB_PORT", non_empty("DB_PORT"), 5432)?,
                user: non_empty("DB_USER").ok_or(DbConfigError::Missing("DB_USER"))?,
                password: lookup("DB_PASS").unwrap_or_default(),
                database: non_empty("DB_NAME").ok_or(DbConfigError::Missing("DB_NAME"))?,
            },
        };

        Ok(Self {
            target,
            max_connections: parse_or("DB_MAX_CONNECTIONS", non_empty("DB_MAX_CONNECTIONS"), 20)?,
            acquire_timeout_secs: parse_or(
                "DB_ACQUIRE_TIMEOUT_SECS",
                non_empty("DB_ACQUIRE_TIMEOUT_SECS"),
                5,
            )?,
            statement_timeout_ms: parse_or(
                "DB_STATEMENT_TIMEOUT_MS",
                non_empty("DB_STATEMENT_TIMEOUT_MS"),
                10_000,
            )?,
        })
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Connection options including the per-session statement timeout.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = match &self.target {
            ConnectionTarget::Url(url) => PgConnectOptions::from_str(url)?,
            ConnectionTarget::Discrete {
                host,
                port,
                user,
                password,
                database,
            } => PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(database),
        };
        Ok(options.options([("statement_timeout", self.statement_timeout_ms.to_string())]))
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, DbConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| DbConfigError::Invalid { name, value }),
    }
}
