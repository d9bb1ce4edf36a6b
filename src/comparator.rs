//! Per-table comparison pipeline and batch driver

use crate::catalog::Catalog;
use crate::error::{Phase, ReconError, Result};
use crate::fetch::DatasetFetcher;
use crate::introspect::introspect;
use crate::key_resolver::KeyResolver;
use crate::model::ComparisonResult;
use crate::progress::TableProgress;
use crate::reconcile::Reconciler;
use serde::Serialize;

/// A table whose comparison failed, and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFailure {
    pub table: String,
    pub phase: Option<Phase>,
    pub message: String,
}

impl TableFailure {
    fn from_error(table: &str, error: &ReconError) -> Self {
        Self {
            table: error.table().unwrap_or(table).to_string(),
            phase: error.phase(),
            message: error.to_string(),
        }
    }
}

/// Results of a batch run: one entry per table, in the order requested
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub results: Vec<ComparisonResult>,
    pub failures: Vec<TableFailure>,
}

impl BatchOutcome {
    pub fn tables_with_differences(&self) -> usize {
        self.results.iter().filter(|r| r.has_differences()).count()
    }
}

/// Compares tables between a left and a right catalog.
///
/// Both catalogs are only read. Column layout and declared key are taken from
/// the left side; the right side is fetched with the same column list.
pub struct TableComparator<'a> {
    left: &'a dyn Catalog,
    right: &'a dyn Catalog,
    resolver: KeyResolver,
    fetcher: DatasetFetcher,
}

impl<'a> TableComparator<'a> {
    pub fn new(left: &'a dyn Catalog, right: &'a dyn Catalog) -> Self {
        Self {
            left,
            right,
            resolver: KeyResolver::default(),
            fetcher: DatasetFetcher::default(),
        }
    }

    pub fn with_resolver(mut self, resolver: KeyResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_fetcher(mut self, fetcher: DatasetFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn compare_table(&self, table: &str) -> Result<ComparisonResult> {
        let schema = introspect(self.left, table)?;

        let resolution = self.resolver.resolve(&schema);
        match resolution.rule {
            Some(rule) => log::info!(
                "Using key {:?} for table {} ({:?}, rule {})",
                resolution.key.columns,
                table,
                resolution.key.provenance,
                rule
            ),
            None => log::info!(
                "Using key {:?} for table {} ({:?})",
                resolution.key.columns,
                table,
                resolution.key.provenance
            ),
        }
        let key = resolution.key;

        let left = self.fetcher.fetch(self.left, &schema, &key)?;
        let right = self.fetcher.fetch(self.right, &schema, &key)?;
        if left.is_truncated() || right.is_truncated() {
            log::warn!(
                "Table {} holds more than {} rows on one side; only the first {} by key are compared",
                table,
                self.fetcher.limit(),
                self.fetcher.limit()
            );
        }

        let reconciliation = Reconciler::new(&schema, &key).reconcile(&left.rows, &right.rows);
        if reconciliation.left_duplicate_keys > 0 || reconciliation.right_duplicate_keys > 0 {
            log::warn!(
                "Table {} has rows sharing a key ({} on {}, {} on {}); the last row of each key was compared",
                table,
                reconciliation.left_duplicate_keys,
                self.left.label(),
                reconciliation.right_duplicate_keys,
                self.right.label()
            );
        }

        Ok(ComparisonResult {
            table: table.to_string(),
            key,
            left_count: left.total,
            right_count: right.total,
            left_fetched: left.rows.len(),
            right_fetched: right.rows.len(),
            left_duplicate_keys: reconciliation.left_duplicate_keys,
            right_duplicate_keys: reconciliation.right_duplicate_keys,
            differences: reconciliation.differences,
            left_only: reconciliation.left_only,
            right_only: reconciliation.right_only,
            schema,
        })
    }

    /// Compare each table in turn. A failing table is recorded and the batch
    /// moves on to the next one.
    pub fn compare_tables(&self, tables: &[String], progress: &TableProgress) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for (i, table) in tables.iter().enumerate() {
            progress.start_table(table);
            log::info!("[{}/{}] Comparing table: {}", i + 1, tables.len(), table);

            match self.compare_table(table) {
                Ok(result) => {
                    log::debug!(
                        "Table {}: {} differences, {} left-only, {} right-only",
                        table,
                        result.differences.len(),
                        result.left_only.len(),
                        result.right_only.len()
                    );
                    outcome.results.push(result);
                }
                Err(e) => {
                    log::error!("Error comparing table {}: {}", table, e);
                    outcome.failures.push(TableFailure::from_error(table, &e));
                }
            }

            progress.finish_table();
        }

        progress.finish(&format!(
            "Compared {} tables ({} failed)",
            outcome.results.len(),
            outcome.failures.len()
        ));
        outcome
    }
}
