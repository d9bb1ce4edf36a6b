//! # tabrecon
//!
//! Table-by-table data reconciliation between two databases that share a
//! schema. Rows are matched by a declared or inferred key and classified as
//! value differences, left-only rows or right-only rows.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod comparator;
pub mod config;
pub mod duckdb_catalog;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod introspect;
pub mod key_builder;
pub mod key_resolver;
pub mod key_rules;
pub mod model;
pub mod output;
pub mod progress;
pub mod reconcile;
pub mod selection;
pub mod sql_quote;
pub mod value;

pub use catalog::Catalog;
pub use comparator::{BatchOutcome, TableComparator, TableFailure};
pub use error::{Phase, ReconError, Result};
pub use fetch::DEFAULT_FETCH_LIMIT;
pub use key_resolver::KeyResolver;
pub use model::{ComparisonKey, ComparisonResult, KeyProvenance, Row, TableSchema};
pub use value::Value;
