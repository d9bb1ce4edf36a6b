//! Match rows of both sides by key and classify them

use crate::key_builder::KeyBuilder;
use crate::model::{ColumnDifference, ComparisonKey, KeyedRow, Row, TableSchema};
use crate::value::Value;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Result of reconciling two row sets.
///
/// Every left key is either in `matched` or in `left_only`, every right key
/// either in `matched` or in `right_only`. All lists are ordered by key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reconciliation {
    pub matched: Vec<String>,
    pub differences: Vec<ColumnDifference>,
    pub left_only: Vec<KeyedRow>,
    pub right_only: Vec<KeyedRow>,
    pub left_duplicate_keys: usize,
    pub right_duplicate_keys: usize,
}

/// Compares the rows of one table under a resolved key
pub struct Reconciler<'a> {
    schema: &'a TableSchema,
    key: &'a ComparisonKey,
}

impl<'a> Reconciler<'a> {
    pub fn new(schema: &'a TableSchema, key: &'a ComparisonKey) -> Self {
        Self { schema, key }
    }

    /// Key each side's rows; a later row replaces an earlier one with the same key
    fn keyed<'r>(&self, rows: &'r [Row]) -> (BTreeMap<String, &'r Row>, usize) {
        let builder = KeyBuilder::new(self.key, self.schema.columns.len());
        let mut map = BTreeMap::new();
        let mut duplicates = 0;
        for row in rows {
            if map.insert(builder.build(row), row).is_some() {
                duplicates += 1;
            }
        }
        (map, duplicates)
    }

    pub fn reconcile(&self, left: &[Row], right: &[Row]) -> Reconciliation {
        let (left_map, left_duplicate_keys) = self.keyed(left);
        let (right_map, right_duplicate_keys) = self.keyed(right);

        let mut result = Reconciliation {
            left_duplicate_keys,
            right_duplicate_keys,
            ..Reconciliation::default()
        };

        for (key, left_row) in &left_map {
            match right_map.get(key) {
                Some(right_row) => {
                    result.matched.push(key.clone());
                    result
                        .differences
                        .extend(self.compare_rows(key, left_row, right_row));
                }
                None => result.left_only.push(KeyedRow {
                    key: key.clone(),
                    row: (*left_row).clone(),
                }),
            }
        }

        result.right_only = right_map
            .iter()
            .filter(|(key, _)| !left_map.contains_key(*key))
            .map(|(key, row)| KeyedRow {
                key: key.clone(),
                row: (*row).clone(),
            })
            .collect();

        result
    }

    /// One difference per column whose values are not equal, in column order
    fn compare_rows(&self, key: &str, left: &Row, right: &Row) -> Vec<ColumnDifference> {
        let null = Value::Null;
        let mut differences = Vec::new();

        for column in &self.schema.columns {
            let left_value = left.get(column).unwrap_or(&null);
            let right_value = right.get(column).unwrap_or(&null);
            if left_value.same_as(right_value) {
                continue;
            }
            differences.push(ColumnDifference {
                key: key.to_string(),
                column: column.clone(),
                left: left_value.clone(),
                right: right_value.clone(),
                key_values: self.key_values(left),
            });
        }

        differences
    }

    fn key_values(&self, row: &Row) -> IndexMap<String, Value> {
        self.key
            .columns
            .iter()
            .map(|c| (c.clone(), row.get(c).cloned().unwrap_or(Value::Null)))
            .collect()
    }
}
