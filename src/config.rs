//! Connection settings for the two sides of a comparison

use crate::error::{ReconError, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_LEFT_PREFIX: &str = "DEV";
pub const DEFAULT_RIGHT_PREFIX: &str = "STAGING";

/// Postgres connection settings read from `<PREFIX>_DB_*` variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresSettings {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub schema: String,
}

impl PostgresSettings {
    /// Read settings from the process environment
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_lookup(prefix, |name| env::var(name).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |suffix: &str, default: &str| -> Result<String> {
            let raw = lookup(&format!("{}_DB_{}", prefix, suffix))
                .unwrap_or_else(|| default.to_string());
            substitute_env_vars(&raw, &lookup)
        };

        let settings = Self {
            host: get("HOST", "localhost")?,
            port: get("PORT", "5432")?,
            user: get("USER", "postgres")?,
            password: get("PASSWORD", "")?,
            dbname: get("NAME", "")?,
            schema: get("SCHEMA", "public")?,
        };

        if settings.dbname.is_empty() {
            return Err(ReconError::config(format!(
                "{}_DB_NAME is not set. Set it in your .env file or environment, or pass a DuckDB file.",
                prefix
            )));
        }

        Ok(settings)
    }

    /// libpq keyword/value connection string
    pub fn connection_string(&self) -> String {
        [
            ("host", &self.host),
            ("port", &self.port),
            ("user", &self.user),
            ("password", &self.password),
            ("dbname", &self.dbname),
        ]
        .iter()
        .filter(|(key, value)| !value.is_empty() || *key != "password")
        .map(|(key, value)| format!("{}={}", key, libpq_value(value)))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Quote a libpq connection parameter when it needs it
fn libpq_value(value: &str) -> String {
    if !value.is_empty() && !value.contains([' ', '\'', '\\']) {
        return value.to_string();
    }
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Where one side's data lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionTarget {
    Postgres(PostgresSettings),
    DuckDbFile(PathBuf),
}

impl ConnectionTarget {
    /// Schema holding the compared tables
    pub fn schema(&self) -> &str {
        match self {
            ConnectionTarget::Postgres(settings) => &settings.schema,
            ConnectionTarget::DuckDbFile(_) => "main",
        }
    }

    /// Description without credentials, for logs
    pub fn describe(&self) -> String {
        match self {
            ConnectionTarget::Postgres(s) => {
                format!("postgres://{}@{}:{}/{}", s.user, s.host, s.port, s.dbname)
            }
            ConnectionTarget::DuckDbFile(path) => format!("duckdb:{}", path.display()),
        }
    }
}

/// One side of the comparison: a label and its connection target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideConfig {
    pub label: String,
    pub target: ConnectionTarget,
}

impl SideConfig {
    /// A DuckDB file if one was given, otherwise Postgres from `<prefix>_DB_*`
    pub fn resolve(prefix: &str, duckdb_file: Option<&Path>) -> Result<Self> {
        let label = prefix.to_lowercase();
        let target = match duckdb_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ReconError::config(format!(
                        "DuckDB file not found: {}",
                        path.display()
                    )));
                }
                ConnectionTarget::DuckDbFile(path.to_path_buf())
            }
            None => ConnectionTarget::Postgres(PostgresSettings::from_env(prefix)?),
        };
        Ok(Self { label, target })
    }
}

/// Substitute `{VAR_NAME}` placeholders using `lookup`
pub fn substitute_env_vars<F>(value: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = value.to_string();

    let mut start = 0;
    while let Some(open_pos) = result[start..].find('{') {
        let open_pos = start + open_pos;
        if let Some(close_pos) = result[open_pos..].find('}') {
            let close_pos = open_pos + close_pos;
            let var_name = result[open_pos + 1..close_pos].to_string();

            let var_value = lookup(&var_name).ok_or_else(|| {
                ReconError::config(format!(
                    "Environment variable '{}' not found. Make sure it's set in your .env file or environment.",
                    var_name
                ))
            })?;

            result.replace_range(open_pos..=close_pos, &var_value);
            start = open_pos + var_value.len();
        } else {
            start = open_pos + 1;
        }
    }

    Ok(result)
}

/// Load `.env` from the current directory if present
pub fn load_env_file() {
    if !Path::new(".env").exists() {
        log::warn!(".env file not found, using system environment variables");
        return;
    }
    if let Err(e) = dotenv::dotenv() {
        log::warn!("Failed to load .env file: {}", e);
    }
}
