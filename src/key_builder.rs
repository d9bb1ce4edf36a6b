//! Turn a row into the identity string used to match it across sides

use crate::model::{ComparisonKey, KeyProvenance, Row};
use crate::value::Value;

/// Separator between `column:value` parts of a key
pub const KEY_DELIMITER: &str = "|";

/// Number of non-blank values kept in an all-columns key
pub const FALLBACK_KEY_WIDTH: usize = 5;

/// Builds key strings for one comparison key.
///
/// Exact mode emits `column:value` for every key column, nulls included as
/// `column:null`. Backslash, `|` and `:` inside names and values are escaped
/// with a backslash, and a non-null value rendering as `null` becomes `\null`,
/// so distinct key values never build the same string.
///
/// Fallback mode applies when an inferred key covers every column of a table
/// wider than [`FALLBACK_KEY_WIDTH`]: only the first non-blank values are kept
/// so keys stay short. Rows that share those leading values collide, which is
/// an accepted accuracy limit of keys inferred without any identity.
#[derive(Debug, Clone, Copy)]
pub struct KeyBuilder<'a> {
    key: &'a ComparisonKey,
    fallback: bool,
}

impl<'a> KeyBuilder<'a> {
    /// `table_width` is the number of columns in the table the key belongs to
    pub fn new(key: &'a ComparisonKey, table_width: usize) -> Self {
        let covers_table = key.columns.len() == table_width;
        Self {
            key,
            fallback: key.provenance != KeyProvenance::Declared
                && covers_table
                && key.columns.len() > FALLBACK_KEY_WIDTH,
        }
    }

    pub fn is_fallback_mode(&self) -> bool {
        self.fallback
    }

    pub fn build(&self, row: &Row) -> String {
        if self.fallback {
            self.build_truncated(row)
        } else {
            self.build_exact(row)
        }
    }

    fn build_exact(&self, row: &Row) -> String {
        self.key
            .columns
            .iter()
            .map(|column| match row.get(column) {
                Some(value) if !value.is_null() => part(column, value),
                _ => format!("{}:null", escape(column)),
            })
            .collect::<Vec<_>>()
            .join(KEY_DELIMITER)
    }

    fn build_truncated(&self, row: &Row) -> String {
        let parts: Vec<String> = self
            .key
            .columns
            .iter()
            .filter_map(|column| match row.get(column) {
                Some(value) if !value.is_blank_for_key() => Some(part(column, value)),
                _ => None,
            })
            .take(FALLBACK_KEY_WIDTH)
            .collect();

        if !parts.is_empty() {
            return parts.join(KEY_DELIMITER);
        }

        // Nothing identifying: use the first column as-is, and as a last
        // resort a token that never matches the other side
        match self.key.columns.first().and_then(|c| row.get(c).map(|v| (c, v))) {
            Some((column, value)) if !value.is_null() => part(column, value),
            _ => format!("row:{}", uuid::Uuid::new_v4()),
        }
    }
}

/// `column:value` for a non-null value
fn part(column: &str, value: &Value) -> String {
    let rendered = escape(&value.to_string());
    if rendered == "null" {
        format!("{}:\\null", escape(column))
    } else {
        format!("{}:{}", escape(column), rendered)
    }
}

fn escape(text: &str) -> String {
    if !text.contains(['\\', '|', ':']) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if matches!(c, '\\' | '|' | ':') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
