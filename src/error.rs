//! Error types for tabrecon operations

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReconError>;

/// Stage of a table comparison in which a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Schema,
    Fetch,
    Count,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Schema => "schema",
            Phase::Fetch => "fetch",
            Phase::Count => "count",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ReconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("Schema error for table '{table}': {message}")]
    Schema { table: String, message: String },

    #[error("Fetch error for table '{table}' ({phase}): {message}")]
    Fetch {
        table: String,
        phase: Phase,
        message: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Operation cancelled by user")]
    Cancelled,
}

impl ReconError {
    pub fn schema(table: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Schema {
            table: table.into(),
            message: msg.into(),
        }
    }

    pub fn fetch(table: impl Into<String>, phase: Phase, msg: impl Into<String>) -> Self {
        Self::Fetch {
            table: table.into(),
            phase,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Table the error belongs to, for per-table failures
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::Schema { table, .. } | Self::Fetch { table, .. } => Some(table),
            _ => None,
        }
    }

    /// Comparison phase the error surfaced in, for per-table failures
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::Schema { .. } => Some(Phase::Schema),
            Self::Fetch { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}
