//! DuckDB engine setup and attaching the compared databases

use crate::config::ConnectionTarget;
use crate::error::{ReconError, Result};
use crate::sql_quote::{quote_identifier, quote_literal};
use duckdb::Connection;

/// Hints shown when the linked DuckDB library cannot start an engine
const LIBRARY_HINT: &str = "Set DUCKDB_LIB_PATH to the directory holding libduckdb, \
or rebuild with the bundled engine: cargo build --features bundled";

/// Start a throwaway engine and report the DuckDB version in use
pub fn init_engine() -> Result<String> {
    let version: String = Connection::open_in_memory()
        .and_then(|connection| connection.query_row("SELECT version()", [], |row| row.get(0)))
        .map_err(|e| {
            ReconError::config(format!("DuckDB engine unavailable: {}\n{}", e, LIBRARY_HINT))
        })?;

    if cfg!(feature = "bundled") {
        log::debug!("Using bundled DuckDB {}", version);
    } else {
        log::debug!("Using system DuckDB {}", version);
    }

    Ok(version)
}

/// Open an in-memory engine with `target` attached read-only under `alias`
pub fn open_attached(target: &ConnectionTarget, alias: &str) -> Result<Connection> {
    let connection = Connection::open_in_memory()?;
    connection.execute_batch("SET enable_progress_bar=false")?;

    let attach_sql = match target {
        ConnectionTarget::Postgres(settings) => {
            connection.execute_batch("INSTALL postgres; LOAD postgres;")?;
            format!(
                "ATTACH {} AS {} (TYPE postgres, READ_ONLY)",
                quote_literal(&settings.connection_string()),
                quote_identifier(alias)
            )
        }
        ConnectionTarget::DuckDbFile(path) => format!(
            "ATTACH {} AS {} (READ_ONLY)",
            quote_literal(&path.to_string_lossy()),
            quote_identifier(alias)
        ),
    };

    connection.execute_batch(&attach_sql).map_err(|e| {
        ReconError::config(format!("Failed to attach {}: {}", target.describe(), e))
    })?;

    Ok(connection)
}
