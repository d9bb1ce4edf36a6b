//! Command-line interface for tabrecon

use crate::config::{DEFAULT_LEFT_PREFIX, DEFAULT_RIGHT_PREFIX};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tabrecon")]
#[command(about = "Compare table contents between two databases row by row")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub sides: SideArgs,
}

/// Where each side of the comparison lives
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct SideArgs {
    /// Use a DuckDB database file as the left side instead of Postgres
    #[arg(long, global = true)]
    pub left_db: Option<PathBuf>,

    /// Use a DuckDB database file as the right side instead of Postgres
    #[arg(long, global = true)]
    pub right_db: Option<PathBuf>,

    /// Environment variable prefix for the left side (<PREFIX>_DB_HOST, ...)
    #[arg(long, global = true, default_value = DEFAULT_LEFT_PREFIX)]
    pub left_env: String,

    /// Environment variable prefix for the right side (<PREFIX>_DB_HOST, ...)
    #[arg(long, global = true, default_value = DEFAULT_RIGHT_PREFIX)]
    pub right_env: String,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List the tables available for comparison
    List {
        /// Include every base table, not only master data tables
        #[arg(long)]
        all_tables: bool,
    },

    /// Compare tables between the two databases
    Compare {
        /// Comma-separated tables to compare
        #[arg(long, value_delimiter = ',')]
        tables: Vec<String>,

        /// Only compare tables whose name contains this text
        #[arg(long)]
        pattern: Option<String>,

        /// Include every base table, not only master data tables
        #[arg(long)]
        all_tables: bool,

        /// Report file (defaults to data_comparison_<timestamp>.json)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Maximum rows fetched per side per table (must be > 0)
        #[arg(long, default_value = "1000", value_parser = validate_limit)]
        limit: usize,

        /// Skip the confirmation asked for large selections
        #[arg(short, long)]
        yes: bool,
    },
}

/// Validate that the row limit is greater than 0
fn validate_limit(s: &str) -> Result<usize, String> {
    let limit: usize = s
        .parse()
        .map_err(|_| format!("Invalid limit: '{}'. Must be a positive integer.", s))?;

    if limit == 0 {
        return Err("Limit must be greater than 0".to_string());
    }

    Ok(limit)
}
