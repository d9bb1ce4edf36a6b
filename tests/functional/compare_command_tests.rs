//! The compare command from argument parsing to the written report

use tabrecon::ReconError;

use crate::common::{sample_data, CliTestRunner};

fn setup_sides(runner: &CliTestRunner) {
    let fixture = runner.fixture();
    fixture
        .setup_left(&format!(
            "{} {} CREATE TABLE orders (id INTEGER, total DOUBLE);
             INSERT INTO m_user VALUES (1, 'x'), (2, 'same');
             INSERT INTO m_role_permission VALUES ('A', 'R1'), ('A', 'R2');",
            sample_data::USER_TABLE,
            sample_data::ROLE_PERMISSION_TABLE
        ))
        .unwrap();
    fixture
        .setup_right(&format!(
            "{} {} CREATE TABLE orders (id INTEGER, total DOUBLE);
             INSERT INTO m_user VALUES (1, 'y'), (2, 'same');
             INSERT INTO m_role_permission VALUES ('A', 'R1'), ('B', 'R3');",
            sample_data::USER_TABLE,
            sample_data::ROLE_PERMISSION_TABLE
        ))
        .unwrap();
}

#[test]
fn test_compare_writes_json_report() {
    let runner = CliTestRunner::new().unwrap();
    setup_sides(&runner);
    let output = runner.fixture().path("report.json");

    runner.expect_success(&["compare", "--output", output.to_str().unwrap()]);

    let report = runner.read_report(&output).unwrap();
    assert_eq!(report["left_label"], "dev");
    assert_eq!(report["right_label"], "staging");
    assert!(report["generated_at"].is_string());

    // Only master tables are compared by default, in catalog order
    let tables = report["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0]["table"], "m_role_permission");
    assert_eq!(tables[0]["key_type"], "Composite (2 cols)");
    assert_eq!(tables[0]["left_only"][0]["key"], "role_code:A|permission_code:R2");
    assert_eq!(tables[0]["right_only"][0]["key"], "role_code:B|permission_code:R3");

    assert_eq!(tables[1]["table"], "m_user");
    assert_eq!(tables[1]["key_type"], "id");
    assert_eq!(tables[1]["count_diff"], 0);
    assert_eq!(tables[1]["partial"], false);
    let diff = &tables[1]["differences"][0];
    assert_eq!(diff["key"], "id:1");
    assert_eq!(diff["column"], "name");
    assert_eq!(diff["left"], "x");
    assert_eq!(diff["right"], "y");
    assert_eq!(diff["key_values"]["id"], 1);

    assert!(report["failures"].as_array().unwrap().is_empty());
}

#[test]
fn test_compare_selected_tables_only() {
    let runner = CliTestRunner::new().unwrap();
    setup_sides(&runner);
    let output = runner.fixture().path("users.json");

    runner.expect_success(&[
        "compare",
        "--tables",
        "m_user,m_unknown",
        "--output",
        output.to_str().unwrap(),
    ]);

    let report = runner.read_report(&output).unwrap();
    let tables = report["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["table"], "m_user");
}

#[test]
fn test_compare_all_tables_with_pattern() {
    let runner = CliTestRunner::new().unwrap();
    setup_sides(&runner);
    let output = runner.fixture().path("orders.json");

    runner.expect_success(&[
        "compare",
        "--all-tables",
        "--pattern",
        "order",
        "--output",
        output.to_str().unwrap(),
    ]);

    let report = runner.read_report(&output).unwrap();
    let tables = report["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0]["table"], "orders");
    assert_eq!(tables[0]["key"]["provenance"], "inferred-single");
}

#[test]
fn test_compare_limit_marks_partial_tables() {
    let runner = CliTestRunner::new().unwrap();
    setup_sides(&runner);
    let output = runner.fixture().path("partial.json");

    runner.expect_success(&[
        "compare",
        "--tables",
        "m_user",
        "--limit",
        "1",
        "--output",
        output.to_str().unwrap(),
    ]);

    let report = runner.read_report(&output).unwrap();
    assert_eq!(report["tables"][0]["partial"], true);
    assert_eq!(report["tables"][0]["left_fetched"], 1);
    assert_eq!(report["tables"][0]["left_count"], 2);
}

#[test]
fn test_compare_records_failed_table_and_continues() {
    let runner = CliTestRunner::new().unwrap();
    let fixture = runner.fixture();
    fixture
        .setup_left(&format!(
            "{} {} INSERT INTO m_user VALUES (1, 'x');",
            sample_data::USER_TABLE,
            sample_data::ROLE_PERMISSION_TABLE
        ))
        .unwrap();
    fixture
        .setup_right(&format!(
            "{} INSERT INTO m_user VALUES (1, 'x');",
            sample_data::USER_TABLE
        ))
        .unwrap();
    let output = fixture.path("failures.json");

    runner.expect_success(&["compare", "--output", output.to_str().unwrap()]);

    let report = runner.read_report(&output).unwrap();
    assert_eq!(report["tables"].as_array().unwrap().len(), 1);
    let failure = &report["failures"][0];
    assert_eq!(failure["table"], "m_role_permission");
    assert_eq!(failure["phase"], "count");
}

#[test]
fn test_compare_without_matching_tables_writes_nothing() {
    let runner = CliTestRunner::new().unwrap();
    setup_sides(&runner);
    let output = runner.fixture().path("empty.json");

    runner.expect_success(&[
        "compare",
        "--pattern",
        "nothing_matches",
        "--output",
        output.to_str().unwrap(),
    ]);

    assert!(!output.exists());
}

#[test]
fn test_compare_with_missing_database_file_fails() {
    let runner = CliTestRunner::new().unwrap();
    runner
        .fixture()
        .setup_left(sample_data::USER_TABLE)
        .unwrap();

    let err = runner.expect_failure(&["compare", "--yes"]);
    assert!(matches!(err, ReconError::Config { .. }));
}
