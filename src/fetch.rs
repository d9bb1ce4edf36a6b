//! Bounded retrieval of one side's rows plus its true row count

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{ComparisonKey, Row, TableSchema};

/// Rows fetched per side per table unless configured otherwise
pub const DEFAULT_FETCH_LIMIT: usize = 1000;

/// Rows fetched from one side, and how many the table really holds
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Row>,
    pub total: u64,
}

impl Dataset {
    /// Whether the table holds rows beyond those fetched
    pub fn is_truncated(&self) -> bool {
        self.total > self.rows.len() as u64
    }
}

/// Fetches at most `limit` rows of a table in catalog column order, sorted by
/// the comparison key.
///
/// Tables larger than the limit are compared only partially; the reported
/// count is still the real one. Both sides keep the same leading key range.
#[derive(Debug, Clone, Copy)]
pub struct DatasetFetcher {
    limit: usize,
}

impl Default for DatasetFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_LIMIT)
    }
}

impl DatasetFetcher {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn fetch(
        &self,
        catalog: &dyn Catalog,
        schema: &TableSchema,
        key: &ComparisonKey,
    ) -> Result<Dataset> {
        let total = catalog.count_rows(&schema.name)?;
        let mut rows =
            catalog.fetch_rows(&schema.name, &schema.columns, &key.columns, self.limit)?;
        rows.truncate(self.limit);

        log::info!(
            "Retrieved {} of {} rows from {} table {}",
            rows.len(),
            total,
            catalog.label(),
            schema.name
        );

        Ok(Dataset { rows, total })
    }
}
