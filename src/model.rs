//! Data model shared by the comparison pipeline and the report layer

use crate::value::Value;
use indexmap::IndexMap;
use serde::Serialize;

/// A fetched row: column name to value, in catalog column order
pub type Row = IndexMap<String, Value>;

/// Column layout of a table as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSchema {
    pub name: String,
    /// Column names in ordinal order
    pub columns: Vec<String>,
    /// Declared primary key columns in constraint order, empty if none
    pub identity: Vec<String>,
}

impl TableSchema {
    pub fn has_declared_identity(&self) -> bool {
        !self.identity.is_empty()
    }

    pub fn contains_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }
}

/// How the comparison key of a table was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyProvenance {
    Declared,
    InferredSingle,
    InferredComposite,
    FallbackAllColumns,
}

/// Ordered columns that identify a row for comparison purposes.
///
/// Every column is a member of the owning table's column set and the list is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonKey {
    pub columns: Vec<String>,
    pub provenance: KeyProvenance,
}

impl ComparisonKey {
    pub fn new(columns: Vec<String>, provenance: KeyProvenance) -> Self {
        Self {
            columns,
            provenance,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.columns.len() > 1
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == KeyProvenance::FallbackAllColumns
    }

    /// Short description used in summaries
    pub fn type_label(&self) -> String {
        if self.is_fallback() {
            "All Columns".to_string()
        } else if self.is_composite() {
            format!("Composite ({} cols)", self.columns.len())
        } else {
            self.columns.first().cloned().unwrap_or_default()
        }
    }
}

/// A row paired with its identity string
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedRow {
    pub key: String,
    pub row: Row,
}

/// One differing column of a row present on both sides
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDifference {
    pub key: String,
    pub column: String,
    pub left: Value,
    pub right: Value,
    /// Key column values of the left row, for readability
    pub key_values: IndexMap<String, Value>,
}

/// Full outcome of comparing one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub table: String,
    pub schema: TableSchema,
    pub key: ComparisonKey,
    /// True row counts, measured independently of the fetch cap
    pub left_count: u64,
    pub right_count: u64,
    /// Rows actually fetched and reconciled
    pub left_fetched: usize,
    pub right_fetched: usize,
    /// Rows collapsed because another row on the same side had the same key
    pub left_duplicate_keys: usize,
    pub right_duplicate_keys: usize,
    pub differences: Vec<ColumnDifference>,
    pub left_only: Vec<KeyedRow>,
    pub right_only: Vec<KeyedRow>,
}

impl ComparisonResult {
    pub fn count_diff(&self) -> i64 {
        self.left_count as i64 - self.right_count as i64
    }

    pub fn has_differences(&self) -> bool {
        !self.differences.is_empty() || !self.left_only.is_empty() || !self.right_only.is_empty()
    }

    /// Whether either side holds more rows than were fetched
    pub fn is_partial(&self) -> bool {
        self.left_count > self.left_fetched as u64 || self.right_count > self.right_fetched as u64
    }
}
