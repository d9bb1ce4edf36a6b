//! Catalog and storage access for one side of a comparison

use crate::error::Result;
use crate::model::Row;

/// Read-only access to a database's catalog metadata and table data.
///
/// Implementations report per-table failures as `Schema` or `Fetch` errors
/// naming the table.
pub trait Catalog {
    /// Human readable name of this side, used in logs and reports
    fn label(&self) -> &str;

    /// Base tables ordered by name
    fn list_base_tables(&self) -> Result<Vec<String>>;

    /// Column names in ordinal order; empty when the table is unknown
    fn list_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Declared primary key columns in constraint order, possibly empty
    fn list_declared_identity_columns(&self, table: &str) -> Result<Vec<String>>;

    /// Up to `limit` rows projected onto `columns`, values keyed in `columns` order
    fn fetch_rows(
        &self,
        table: &str,
        columns: &[String],
        order_by: &[String],
        limit: usize,
    ) -> Result<Vec<Row>>;

    /// True, uncapped row count
    fn count_rows(&self, table: &str) -> Result<u64>;
}
