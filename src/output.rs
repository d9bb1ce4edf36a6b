//! Output formatting utilities

use crate::comparator::{BatchOutcome, TableFailure};
use crate::error::Result;
use crate::model::ComparisonResult;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Number of value differences listed per table in the console summary
const SAMPLE_DIFFERENCES: usize = 5;

/// Pretty printer for tabrecon output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the numbered list of tables
    pub fn print_table_list(tables: &[String]) {
        if tables.is_empty() {
            println!("No tables found.");
            return;
        }

        println!("📋 Available tables ({}):", tables.len());
        for (i, table) in tables.iter().enumerate() {
            println!("{:>4}. {}", i + 1, table);
        }
    }

    /// Print the summary of one compared table
    pub fn print_table_result(result: &ComparisonResult, left_label: &str, right_label: &str) {
        let status = if result.has_differences() { "❌" } else { "✅" };
        println!("{} Table: {}", status, result.table);
        println!("├─ Key: {} {:?}", result.key.type_label(), result.key.columns);
        println!(
            "├─ Rows: {} {} / {} {} (difference {:+})",
            left_label,
            result.left_count,
            right_label,
            result.right_count,
            result.count_diff()
        );
        if result.is_partial() {
            println!(
                "├─ ⚠️  Partial comparison: fetched {} / {} rows",
                result.left_fetched, result.right_fetched
            );
        }
        if result.left_duplicate_keys > 0 || result.right_duplicate_keys > 0 {
            println!(
                "├─ ⚠️  Duplicate keys: {} {} / {} {}",
                left_label, result.left_duplicate_keys, right_label, result.right_duplicate_keys
            );
        }

        println!("├─ Value differences: {}", result.differences.len());
        for diff in result.differences.iter().take(SAMPLE_DIFFERENCES) {
            println!(
                "│  └─ {} {}: {} → {}",
                diff.key, diff.column, diff.left, diff.right
            );
        }
        if result.differences.len() > SAMPLE_DIFFERENCES {
            println!(
                "│  └─ ... and {} more",
                result.differences.len() - SAMPLE_DIFFERENCES
            );
        }

        println!("├─ Only in {}: {}", left_label, result.left_only.len());
        println!("└─ Only in {}: {}", right_label, result.right_only.len());
    }

    /// Print the closing summary of a batch
    pub fn print_batch_summary(outcome: &BatchOutcome) {
        println!("📊 Comparison summary");
        println!("├─ Tables compared: {}", outcome.results.len());
        println!(
            "├─ Tables with differences: {}",
            outcome.tables_with_differences()
        );
        if outcome.failures.is_empty() {
            println!("└─ Failed tables: 0");
            return;
        }
        println!("└─ Failed tables: {}", outcome.failures.len());
        for (i, failure) in outcome.failures.iter().enumerate() {
            let prefix = if i == outcome.failures.len() - 1 {
                "   └─"
            } else {
                "   ├─"
            };
            println!("{} {}: {}", prefix, failure.table, failure.message);
        }
    }
}

/// One table entry of the report: the full result plus summary fields
#[derive(Debug, Serialize)]
pub struct TableReport<'a> {
    #[serde(flatten)]
    pub result: &'a ComparisonResult,
    pub key_type: String,
    pub count_diff: i64,
    pub partial: bool,
}

impl<'a> From<&'a ComparisonResult> for TableReport<'a> {
    fn from(result: &'a ComparisonResult) -> Self {
        Self {
            key_type: result.key.type_label(),
            count_diff: result.count_diff(),
            partial: result.is_partial(),
            result,
        }
    }
}

/// Machine-readable report of a batch comparison
#[derive(Debug, Serialize)]
pub struct ComparisonReport<'a> {
    pub generated_at: String,
    pub left_label: &'a str,
    pub right_label: &'a str,
    pub tables: Vec<TableReport<'a>>,
    pub failures: &'a [TableFailure],
}

impl<'a> ComparisonReport<'a> {
    pub fn new(outcome: &'a BatchOutcome, left_label: &'a str, right_label: &'a str) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            left_label,
            right_label,
            tables: outcome.results.iter().map(TableReport::from).collect(),
            failures: &outcome.failures,
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, JsonFormatter::format(self)?)?;
        Ok(())
    }
}

/// JSON formatter
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format any serializable data as pretty JSON
    pub fn format<T: serde::Serialize + ?Sized>(data: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(data)?)
    }
}

/// `data_comparison_<YYYYMMDD_HHMMSS>.json` for the given time
pub fn default_output_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from(format!(
        "data_comparison_{}.json",
        now.format("%Y%m%d_%H%M%S")
    ))
}
