//! Key construction corner cases driven through the comparator

use tabrecon::progress::TableProgress;
use tabrecon::{KeyProvenance, Phase, TableComparator, Value};

use crate::common::{row, MemoryCatalog};

const WIDE: &[&str] = &["name", "color", "size", "weight", "origin", "grade", "notes"];

fn wide_row(values: [&str; 7]) -> tabrecon::Row {
    let pairs: Vec<(&str, Value)> = WIDE
        .iter()
        .zip(values)
        .map(|(c, v)| (*c, if v == "NULL" { Value::Null } else { Value::text(v) }))
        .collect();
    row(&pairs)
}

#[test]
fn test_wide_fallback_key_ignores_trailing_columns() {
    // Only the first five non-blank values form the key, so a change in a
    // later column shows up as a value difference rather than a new row
    let left = MemoryCatalog::new("dev").with_table(
        "m_spec",
        WIDE,
        &[],
        vec![wide_row(["bolt", "red", "M4", "2g", "DE", "A", "old note"])],
    );
    let right = MemoryCatalog::new("staging").with_table(
        "m_spec",
        WIDE,
        &[],
        vec![wide_row(["bolt", "red", "M4", "2g", "DE", "B", "new note"])],
    );

    let result = TableComparator::new(&left, &right).compare_table("m_spec").unwrap();

    assert_eq!(result.key.provenance, KeyProvenance::FallbackAllColumns);
    assert_eq!(result.key.type_label(), "All Columns");
    assert!(result.left_only.is_empty());
    assert!(result.right_only.is_empty());
    assert_eq!(result.differences.len(), 2);
    assert_eq!(result.differences[0].column, "grade");
    assert_eq!(result.differences[1].column, "notes");
}

#[test]
fn test_wide_fallback_key_collisions_are_counted() {
    let rows = vec![
        wide_row(["bolt", "red", "M4", "2g", "DE", "A", "x"]),
        wide_row(["bolt", "red", "M4", "2g", "DE", "B", "y"]),
    ];
    let left = MemoryCatalog::new("dev").with_table("m_spec", WIDE, &[], rows.clone());
    let right = MemoryCatalog::new("staging").with_table("m_spec", WIDE, &[], rows);

    let result = TableComparator::new(&left, &right).compare_table("m_spec").unwrap();

    assert_eq!(result.left_duplicate_keys, 1);
    assert_eq!(result.right_duplicate_keys, 1);
    assert!(!result.has_differences());
}

#[test]
fn test_all_null_rows_never_match() {
    let nulls = wide_row(["NULL"; 7]);
    let left = MemoryCatalog::new("dev").with_table("m_spec", WIDE, &[], vec![nulls.clone()]);
    let right = MemoryCatalog::new("staging").with_table("m_spec", WIDE, &[], vec![nulls]);

    let result = TableComparator::new(&left, &right).compare_table("m_spec").unwrap();

    assert_eq!(result.left_only.len(), 1);
    assert_eq!(result.right_only.len(), 1);
    assert!(result.left_only[0].key.starts_with("row:"));
}

#[test]
fn test_null_key_parts_match_across_sides() {
    let columns = ["role_code", "permission_code"];
    let r = row(&[("role_code", Value::text("A")), ("permission_code", Value::Null)]);
    let left = MemoryCatalog::new("dev").with_table("m_link", &columns, &[], vec![r.clone()]);
    let right = MemoryCatalog::new("staging").with_table("m_link", &columns, &[], vec![r]);

    let result = TableComparator::new(&left, &right).compare_table("m_link").unwrap();
    assert!(!result.has_differences());
}

#[test]
fn test_delimiters_in_key_values_keep_rows_apart() {
    let columns = ["role_code", "permission_code"];
    let link = |role: Value, permission: &str| {
        row(&[("role_code", role), ("permission_code", Value::text(permission))])
    };
    let rows = vec![
        link(Value::text("1|permission_code:2"), "3"),
        link(Value::text("1"), "2|permission_code:3"),
        link(Value::text("null"), "x"),
        link(Value::Null, "x"),
    ];
    let left = MemoryCatalog::new("dev").with_table("m_link", &columns, &[], rows.clone());
    let right = MemoryCatalog::new("staging").with_table("m_link", &columns, &[], rows);

    let result = TableComparator::new(&left, &right).compare_table("m_link").unwrap();

    assert_eq!(result.left_duplicate_keys, 0);
    assert_eq!(result.right_duplicate_keys, 0);
    assert!(!result.has_differences());
}

#[test]
fn test_inferred_key_over_every_column_is_truncated() {
    // Six id columns all match the suffix rule, so the key spans the table
    let columns = ["a_id", "b_id", "c_id", "d_id", "e_id", "f_id"];
    let make = |last: i64| {
        let pairs: Vec<(&str, Value)> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let value = if i == 5 { last } else { i as i64 + 1 };
                (*c, Value::from(value))
            })
            .collect();
        row(&pairs)
    };
    let left = MemoryCatalog::new("dev").with_table("m_map", &columns, &[], vec![make(6), make(7)]);
    let right = MemoryCatalog::new("staging").with_table("m_map", &columns, &[], vec![make(6)]);

    let result = TableComparator::new(&left, &right).compare_table("m_map").unwrap();

    assert_eq!(result.key.provenance, KeyProvenance::InferredComposite);
    assert_eq!(result.key.columns.len(), columns.len());
    // Rows differing only after the fifth value share a key
    assert_eq!(result.left_duplicate_keys, 1);
    assert!(result.left_only.is_empty());
    assert!(result.right_only.is_empty());
}

#[test]
fn test_batch_records_each_failing_phase() {
    let columns = ["id", "name"];
    let sample = vec![row(&[("id", Value::Int(1)), ("name", Value::text("a"))])];
    let left = MemoryCatalog::new("dev")
        .with_table("m_a", &columns, &["id"], sample.clone())
        .with_table("m_b", &columns, &["id"], sample.clone())
        .with_table("m_c", &columns, &["id"], sample.clone())
        .failing("m_a", Phase::Schema);
    let right = MemoryCatalog::new("staging")
        .with_table("m_a", &columns, &["id"], sample.clone())
        .with_table("m_b", &columns, &["id"], sample.clone())
        .with_table("m_c", &columns, &["id"], sample)
        .failing("m_b", Phase::Fetch);

    let tables: Vec<String> = ["m_a", "m_b", "m_c"].iter().map(|s| s.to_string()).collect();
    let outcome = TableComparator::new(&left, &right)
        .compare_tables(&tables, &TableProgress::new_minimal());

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].table, "m_c");
    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.failures[0].table, "m_a");
    assert_eq!(outcome.failures[0].phase, Some(Phase::Schema));
    assert_eq!(outcome.failures[1].table, "m_b");
    assert_eq!(outcome.failures[1].phase, Some(Phase::Fetch));
}
