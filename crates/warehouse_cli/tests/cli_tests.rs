use std::path::PathBuf;

use assert_cmd::Command;
use duckdb::Connection;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Helper to create a Command for the whv binary
fn whv() -> Command {
    Command::cargo_bin("whv").expect("Failed to find whv binary")
}

/// Knobs for deliberately breaking the fixture warehouse.
#[derive(Default)]
struct FixtureSpec {
    /// Build mart_it without `occupation_group` and with a dangling key
    broken_mart_it: bool,
    /// Add a column to dim_employer that no contract declares
    extra_employer_column: bool,
    /// Leave dim_auxilliary_attributes without rows
    empty_auxilliary: bool,
}

/// Builds a complete job-ads warehouse fixture: the fact table, all five
/// dimensions, and the three mart views.
fn build_warehouse(dir: &TempDir, spec: FixtureSpec) -> PathBuf {
    let path = dir.path().join("job_ads.duckdb");
    let conn = Connection::open(&path).expect("create fixture database");

    conn.execute_batch(
        "CREATE TABLE fct_job_ads (
             job_description_id INTEGER, auxilliary_id VARCHAR, employer_id VARCHAR,
             job_details_id VARCHAR, occupation_id VARCHAR, vacancies INTEGER,
             relevance DOUBLE, application_deadline TIMESTAMP);
         INSERT INTO fct_job_ads
             VALUES (1, 'aux1', 'emp1', 'jd1', 'occ1', 2, 0.87, TIMESTAMP '2024-06-01 00:00:00');

         CREATE TABLE dim_occupation (
             occupation_id VARCHAR, occupation VARCHAR,
             occupation_group VARCHAR, occupation_field VARCHAR);
         INSERT INTO dim_occupation VALUES ('occ1', 'Developer', 'Software', 'IT');

         CREATE TABLE dim_job_details (
             job_details_id VARCHAR, employment_type VARCHAR, salary_type VARCHAR,
             duration VARCHAR, scope_of_work_min INTEGER, scope_of_work_max INTEGER);
         INSERT INTO dim_job_details VALUES ('jd1', 'Full time', 'Monthly', 'Permanent', 50, 100);

         CREATE TABLE dim_job_description (
             job_description_id INTEGER, headline VARCHAR,
             description_text VARCHAR, description_html VARCHAR);
         INSERT INTO dim_job_description VALUES (1, 'Rust developer', 'text', '<p>text</p>');

         CREATE TABLE dim_employer (
             employer_id VARCHAR, employer_name VARCHAR, employer_workplace VARCHAR,
             employer_organization_number VARCHAR, workplace_street_address VARCHAR,
             workplace_region VARCHAR, workplace_postcode VARCHAR,
             workplace_city VARCHAR, workplace_country VARCHAR);
         INSERT INTO dim_employer
             VALUES ('emp1', 'Acme', 'HQ', '556677-8899', 'Main St 1',
                     'Stockholm', '11122', 'Stockholm', 'Sweden');

         CREATE TABLE dim_auxilliary_attributes (
             auxilliary_id VARCHAR, experience_required VARCHAR,
             access_to_own_car VARCHAR, driving_license_required VARCHAR);",
    )
    .expect("create base relations");

    if !spec.empty_auxilliary {
        conn.execute_batch(
            "INSERT INTO dim_auxilliary_attributes VALUES ('aux1', 'true', 'false', 'false');",
        )
        .expect("populate dim_auxilliary_attributes");
    }

    if spec.extra_employer_column {
        conn.execute_batch("ALTER TABLE dim_employer ADD COLUMN internal_note VARCHAR;")
            .expect("add undeclared column");
    }

    let mart_select = "SELECT f.vacancies, o.occupation, o.occupation_field,
                f.application_deadline, d.headline, e.employer_name, j.employment_type,
                j.salary_type, j.duration, e.workplace_region, f.job_description_id,
                d.description_html, o.occupation_group
         FROM fct_job_ads f
         JOIN dim_occupation o USING (occupation_id)
         JOIN dim_job_description d USING (job_description_id)
         JOIN dim_employer e USING (employer_id)
         JOIN dim_job_details j USING (job_details_id)";

    if spec.broken_mart_it {
        conn.execute_batch(
            "CREATE TABLE mart_it (
                 vacancies INTEGER, occupation VARCHAR, occupation_field VARCHAR,
                 application_deadline TIMESTAMP, headline VARCHAR, employer_name VARCHAR,
                 employment_type VARCHAR, salary_type VARCHAR, duration VARCHAR,
                 workplace_region VARCHAR, job_description_id INTEGER, description_html VARCHAR);
             INSERT INTO mart_it
                 VALUES (2, 'Dev', 'IT', TIMESTAMP '2024-06-01 00:00:00', 'h', 'Acme',
                         'Full time', 'Monthly', 'Permanent', 'Stockholm', 999, '<p>');",
        )
        .expect("create broken mart_it");
    } else {
        conn.execute_batch(&format!("CREATE VIEW mart_it AS {mart_select};"))
            .expect("create mart_it");
    }

    conn.execute_batch(&format!(
        "CREATE VIEW mart_economics AS {mart_select};
         CREATE VIEW mart_construction AS {mart_select};"
    ))
    .expect("create remaining marts");

    conn.close().map_err(|(_, e)| e).expect("close fixture");
    path
}

fn error_line_count(expected: usize) -> impl Predicate<str> {
    predicate::function(move |out: &str| {
        out.lines().filter(|l| l.starts_with("ERROR")).count() == expected
    })
}

// ============================================================================
// end-to-end scenarios
// ============================================================================

#[test]
fn missing_database_exits_fatal() {
    whv()
        .arg("/no/such/place/job_ads.duckdb")
        .assert()
        .code(2)
        .stdout(error_line_count(0))
        .stderr(predicate::str::contains("FATAL"))
        .stderr(predicate::str::contains("Cannot open database"));
}

#[test]
fn healthy_warehouse_passes() {
    let dir = TempDir::new().unwrap();
    let db = build_warehouse(&dir, FixtureSpec::default());

    whv()
        .arg(&db)
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASS"))
        .stdout(error_line_count(0));
}

#[test]
fn broken_mart_reports_exactly_two_findings() {
    let dir = TempDir::new().unwrap();
    let db = build_warehouse(
        &dir,
        FixtureSpec {
            broken_mart_it: true,
            ..Default::default()
        },
    );

    whv()
        .arg(&db)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Column 'occupation_group' is missing",
        ))
        .stdout(predicate::str::contains(
            "All job_description_ids in main.mart_it must exist in main.fct_job_ads",
        ))
        .stdout(predicate::str::contains("Validation FAIL"))
        .stdout(error_line_count(2));
}

#[test]
fn empty_relation_fails_its_non_emptiness_check() {
    let dir = TempDir::new().unwrap();
    let db = build_warehouse(
        &dir,
        FixtureSpec {
            empty_auxilliary: true,
            ..Default::default()
        },
    );

    whv()
        .arg(&db)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "main.dim_auxilliary_attributes should not be empty",
        ))
        // the empty relation is still structurally valid, so that is the
        // only finding
        .stdout(error_line_count(1));
}

// ============================================================================
// column policy
// ============================================================================

#[test]
fn undeclared_columns_ignored_by_default() {
    let dir = TempDir::new().unwrap();
    let db = build_warehouse(
        &dir,
        FixtureSpec {
            extra_employer_column: true,
            ..Default::default()
        },
    );

    whv().arg(&db).assert().success();
}

#[test]
fn strict_mode_flags_undeclared_columns() {
    let dir = TempDir::new().unwrap();
    let db = build_warehouse(
        &dir,
        FixtureSpec {
            extra_employer_column: true,
            ..Default::default()
        },
    );

    whv()
        .arg(&db)
        .arg("--strict")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unexpected column 'internal_note'"))
        .stdout(error_line_count(1));
}

// ============================================================================
// output formats and flags
// ============================================================================

#[test]
fn json_format_emits_line_delimited_records() {
    let dir = TempDir::new().unwrap();
    let db = build_warehouse(
        &dir,
        FixtureSpec {
            broken_mart_it: true,
            ..Default::default()
        },
    );

    let output = whv()
        .arg(&db)
        .arg("--format")
        .arg("json")
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is a JSON record"))
        .collect();

    // two findings plus the summary record
    assert_eq!(records.len(), 3);
    let summary = records.last().unwrap();
    assert_eq!(summary["passed"], serde_json::json!(false));
    assert_eq!(summary["findings"], serde_json::json!(2));
}

#[test]
fn generous_timeout_does_not_affect_a_healthy_run() {
    let dir = TempDir::new().unwrap();
    let db = build_warehouse(&dir, FixtureSpec::default());

    whv()
        .arg(&db)
        .arg("--timeout")
        .arg("300")
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASS"));
}

#[test]
fn namespace_override_reports_relations_missing_from_that_namespace() {
    let dir = TempDir::new().unwrap();
    let db = build_warehouse(&dir, FixtureSpec::default());

    // everything lives in 'main'; pointing the mart group elsewhere makes
    // all three marts missing
    whv()
        .arg(&db)
        .arg("--namespace-map")
        .arg("mart=analytics")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Missing relation 'mart_it'"))
        .stdout(predicate::str::contains("Missing relation 'mart_economics'"))
        .stdout(predicate::str::contains(
            "Missing relation 'mart_construction'",
        ));
}

#[test]
fn repeat_runs_produce_identical_output() {
    let dir = TempDir::new().unwrap();
    let db = build_warehouse(
        &dir,
        FixtureSpec {
            broken_mart_it: true,
            ..Default::default()
        },
    );

    let first = whv().arg(&db).assert().code(1).get_output().stdout.clone();
    let second = whv().arg(&db).assert().code(1).get_output().stdout.clone();
    assert_eq!(first, second);
}
