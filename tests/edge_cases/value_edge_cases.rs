//! Values stored with different column types on each side

use tabrecon::{TableComparator, Value};

use crate::common::TestFixture;

#[test]
fn test_numeric_representations_compare_equal() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .setup_left(
            "CREATE TABLE m_price (id INTEGER PRIMARY KEY, amount DECIMAL(10,2), qty INTEGER);
             INSERT INTO m_price VALUES (1, 10.50, 3), (2, 7.00, 4);",
        )
        .unwrap();
    fixture
        .setup_right(
            "CREATE TABLE m_price (id BIGINT PRIMARY KEY, amount DOUBLE, qty BIGINT);
             INSERT INTO m_price VALUES (1, 10.5, 3), (2, 7.25, 4);",
        )
        .unwrap();
    let (left, right) = fixture.open_catalogs().unwrap();

    let result = TableComparator::new(&left, &right).compare_table("m_price").unwrap();

    assert!(result.left_only.is_empty());
    assert!(result.right_only.is_empty());
    assert_eq!(result.differences.len(), 1);
    assert_eq!(result.differences[0].key, "id:2");
    assert_eq!(result.differences[0].column, "amount");
    assert_eq!(result.differences[0].left, Value::decimal("7"));
    assert_eq!(result.differences[0].right, Value::Float(7.25));
}

#[test]
fn test_date_equals_midnight_timestamp() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .setup_left(
            "CREATE TABLE m_holiday (code VARCHAR PRIMARY KEY, day DATE);
             INSERT INTO m_holiday VALUES ('NY', DATE '2024-01-01'), ('XM', DATE '2024-12-25');",
        )
        .unwrap();
    fixture
        .setup_right(
            "CREATE TABLE m_holiday (code VARCHAR PRIMARY KEY, day TIMESTAMP);
             INSERT INTO m_holiday VALUES ('NY', TIMESTAMP '2024-01-01 00:00:00'),
                                          ('XM', TIMESTAMP '2024-12-25 08:30:00');",
        )
        .unwrap();
    let (left, right) = fixture.open_catalogs().unwrap();

    let result = TableComparator::new(&left, &right).compare_table("m_holiday").unwrap();

    assert_eq!(result.differences.len(), 1);
    assert_eq!(result.differences[0].key, "code:XM");
}

#[test]
fn test_null_differs_from_empty_text() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .setup_left(
            "CREATE TABLE m_user (id INTEGER PRIMARY KEY, email VARCHAR);
             INSERT INTO m_user VALUES (1, NULL), (2, NULL);",
        )
        .unwrap();
    fixture
        .setup_right(
            "CREATE TABLE m_user (id INTEGER PRIMARY KEY, email VARCHAR);
             INSERT INTO m_user VALUES (1, ''), (2, NULL);",
        )
        .unwrap();
    let (left, right) = fixture.open_catalogs().unwrap();

    let result = TableComparator::new(&left, &right).compare_table("m_user").unwrap();

    assert_eq!(result.differences.len(), 1);
    assert_eq!(result.differences[0].key, "id:1");
    assert_eq!(result.differences[0].left, Value::Null);
    assert_eq!(result.differences[0].right, Value::text(""));
}

#[test]
fn test_text_and_integer_keys_match_by_rendering() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .setup_left(
            "CREATE TABLE m_country (id INTEGER, name VARCHAR);
             INSERT INTO m_country VALUES (1, 'France');",
        )
        .unwrap();
    fixture
        .setup_right(
            "CREATE TABLE m_country (id VARCHAR, name VARCHAR);
             INSERT INTO m_country VALUES ('1', 'France');",
        )
        .unwrap();
    let (left, right) = fixture.open_catalogs().unwrap();

    let result = TableComparator::new(&left, &right).compare_table("m_country").unwrap();

    // Keys render identically; the id values themselves differ only in type
    assert!(result.left_only.is_empty());
    assert!(result.right_only.is_empty());
    assert!(result.differences.is_empty());
}
