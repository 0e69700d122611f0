//! Integration tests for the techjobs CLI.
//!
//! These tests run the built binary and check its output, exit status, and
//! how it picks the data file.

use rstest::{fixture, rstest};
use serde_json::Value;
use tempfile::TempDir;

mod common;
use common::{
    run_techjobs_in_dir, run_techjobs_with_env, stderr, stdout, write_config, write_csv,
};

const JOBS: &str = "\
name,employer,location,core competency
Junior Web Developer,Cozy,Portland,Ruby
\"Developer, Mobile\",\"Cerner, Inc\",Kansas City,Java
Senior Ruby Developer,Cozy,Portland,Ruby
Data Engineer,Enterprise Holdings,Saint Louis,Python
";

/// One-column CSV whose only value tells the tests which file was loaded.
fn marker_csv(marker: &str) -> String {
    format!("employer\n{marker}\n")
}

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a temporary directory holding `jobs.csv`
#[fixture]
fn jobs_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    write_csv(temp.path(), "jobs.csv", JOBS);
    temp
}

// ============================================================================
// Query Commands
// ============================================================================

#[rstest]
fn test_list_prints_distinct_values(jobs_dir: TempDir) {
    let output = run_techjobs_in_dir(
        jobs_dir.path(),
        &["--data", "jobs.csv", "list", "employer"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("*** All employer Values ***"));
    let values: Vec<&str> = stdout
        .lines()
        .skip_while(|line| !line.starts_with("***"))
        .skip(1)
        .collect();
    assert_eq!(values, vec!["Cozy", "Cerner, Inc", "Enterprise Holdings"]);
}

#[rstest]
fn test_all_prints_every_job(jobs_dir: TempDir) {
    let output = run_techjobs_in_dir(jobs_dir.path(), &["--data", "jobs.csv", "all"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert_eq!(stdout.matches("*****").count(), 8);
    assert!(stdout.contains("name: Developer, Mobile\nemployer: Cerner, Inc"));
}

#[rstest]
fn test_search_across_all_fields(jobs_dir: TempDir) {
    let output = run_techjobs_in_dir(jobs_dir.path(), &["--data", "jobs.csv", "search", "RUBY"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Found 2 jobs matching \"RUBY\" in all fields:"));
    assert!(stdout.contains("name: Junior Web Developer"));
    assert!(stdout.contains("name: Senior Ruby Developer"));
}

#[rstest]
#[case::long_flag("--field")]
#[case::short_flag("-f")]
fn test_search_in_one_field(jobs_dir: TempDir, #[case] flag: &str) {
    let output = run_techjobs_in_dir(
        jobs_dir.path(),
        &["--data", "jobs.csv", "search", "ruby", flag, "name"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Found 1 jobs matching \"ruby\" in name:"));
    assert!(stdout.contains("name: Senior Ruby Developer"));
    assert!(!stdout.contains("Junior Web Developer"));
}

#[rstest]
fn test_search_without_matches_says_no_results(jobs_dir: TempDir) {
    let output = run_techjobs_in_dir(
        jobs_dir.path(),
        &["--data", "jobs.csv", "search", "plumber"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Found 0 jobs"));
    assert!(stdout.contains("No results"));
    assert!(!stdout.contains("*****"));
}

// ============================================================================
// JSON Output
// ============================================================================

#[rstest]
fn test_list_json_is_an_array_of_strings(jobs_dir: TempDir) {
    let output = run_techjobs_in_dir(
        jobs_dir.path(),
        &["--data", "jobs.csv", "--json", "list", "location"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: Value = serde_json::from_str(&stdout(&output)).expect("stdout is JSON");
    assert_eq!(
        json,
        serde_json::json!(["Portland", "Kansas City", "Saint Louis"])
    );
}

#[rstest]
fn test_search_json_is_an_array_of_jobs(jobs_dir: TempDir) {
    let output = run_techjobs_in_dir(
        jobs_dir.path(),
        &["--data", "jobs.csv", "--json", "search", "cerner"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: Value = serde_json::from_str(&stdout(&output)).expect("stdout is JSON");
    let jobs = json.as_array().expect("JSON array");
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["employer"], "Cerner, Inc");
    assert_eq!(jobs[0]["core competency"], "Java");
    let keys: Vec<&String> = jobs[0].as_object().expect("JSON object").keys().collect();
    assert_eq!(keys.len(), 4);
}

#[rstest]
fn test_json_without_matches_is_an_empty_array(jobs_dir: TempDir) {
    let output = run_techjobs_in_dir(
        jobs_dir.path(),
        &["--data", "jobs.csv", "--json", "search", "plumber"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: Value = serde_json::from_str(&stdout(&output)).expect("stdout is JSON");
    assert_eq!(json, serde_json::json!([]));
}

// ============================================================================
// Failures
// ============================================================================

#[rstest]
fn test_missing_data_file_fails_with_cause_chain(temp_dir: TempDir) {
    let output = run_techjobs_in_dir(temp_dir.path(), &["--data", "nope.csv", "all"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("error: failed to load job data"), "stderr: {stderr}");
    assert!(stderr.contains("caused by: cannot open nope.csv"), "stderr: {stderr}");
    assert!(stdout(&output).is_empty());
}

#[rstest]
fn test_unknown_field_fails(jobs_dir: TempDir) {
    let output = run_techjobs_in_dir(
        jobs_dir.path(),
        &["--data", "jobs.csv", "list", "salary"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: unknown field 'salary'"));
}

#[rstest]
fn test_field_names_are_case_sensitive(jobs_dir: TempDir) {
    let output = run_techjobs_in_dir(
        jobs_dir.path(),
        &["--data", "jobs.csv", "search", "cozy", "--field", "Employer"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown field 'Employer'"));
}

#[rstest]
fn test_malformed_data_file_fails(temp_dir: TempDir) {
    write_csv(temp_dir.path(), "bad.csv", "employer,title\nAcme\n");
    let output = run_techjobs_in_dir(temp_dir.path(), &["--data", "bad.csv", "all"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(
        stderr.contains("caused by: row at line 2 has 1 fields, expected 2"),
        "stderr: {stderr}"
    );
}

#[rstest]
fn test_missing_config_file_fails(temp_dir: TempDir) {
    let output = run_techjobs_in_dir(temp_dir.path(), &["--config", "missing.yaml", "all"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("error: I/O error"));
}

// ============================================================================
// Data File Resolution
// ============================================================================

#[rstest]
fn test_default_data_file_is_relative_to_working_dir(temp_dir: TempDir) {
    write_csv(temp_dir.path(), "resources/job_data.csv", &marker_csv("Default"));

    let output = run_techjobs_in_dir(temp_dir.path(), &["list", "employer"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Default"));
}

#[rstest]
fn test_config_file_beats_default(temp_dir: TempDir) {
    write_csv(temp_dir.path(), "resources/job_data.csv", &marker_csv("Default"));
    let configured = write_csv(temp_dir.path(), "configured.csv", &marker_csv("Configured"));
    write_config(temp_dir.path(), &configured);

    let output = run_techjobs_in_dir(
        temp_dir.path(),
        &["--config", "techjobs.yaml", "list", "employer"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Configured"));
    assert!(!stdout.contains("Default"));
}

#[rstest]
fn test_data_flag_beats_config_file(temp_dir: TempDir) {
    let configured = write_csv(temp_dir.path(), "configured.csv", &marker_csv("Configured"));
    write_csv(temp_dir.path(), "flag.csv", &marker_csv("Flag"));
    write_config(temp_dir.path(), &configured);

    let output = run_techjobs_in_dir(
        temp_dir.path(),
        &["--config", "techjobs.yaml", "--data", "flag.csv", "list", "employer"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Flag"));
    assert!(!stdout.contains("Configured"));
}

#[rstest]
fn test_env_var_beats_config_file(temp_dir: TempDir) {
    let configured = write_csv(temp_dir.path(), "configured.csv", &marker_csv("Configured"));
    write_csv(temp_dir.path(), "env.csv", &marker_csv("FromEnv"));
    write_config(temp_dir.path(), &configured);

    let output = run_techjobs_with_env(
        temp_dir.path(),
        &["--config", "techjobs.yaml", "list", "employer"],
        &[("TECHJOBS_DATA", "env.csv")],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("FromEnv"));
    assert!(!stdout.contains("Configured"));
}

#[rstest]
fn test_data_flag_beats_env_var(temp_dir: TempDir) {
    write_csv(temp_dir.path(), "env.csv", &marker_csv("FromEnv"));
    write_csv(temp_dir.path(), "flag.csv", &marker_csv("Flag"));

    let output = run_techjobs_with_env(
        temp_dir.path(),
        &["--data", "flag.csv", "list", "employer"],
        &[("TECHJOBS_DATA", "env.csv")],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let stdout = stdout(&output);
    assert!(stdout.contains("Flag"));
    assert!(!stdout.contains("FromEnv"));
}
