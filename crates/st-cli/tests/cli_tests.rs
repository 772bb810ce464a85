//! End-to-end tests for the strata binary
//!
//! Each test builds a throwaway project (strata.yml, migrations directory,
//! DuckDB file) in a temp dir and drives it through the CLI.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the compiled strata binary
fn strata_bin() -> String {
    env!("CARGO_BIN_EXE_strata").to_string()
}

/// Run a `strata` CLI command in `project` and return (stdout, stderr, success).
fn run_strata(project: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(strata_bin())
        .arg("--project-dir")
        .arg(project)
        .args(args)
        .env_remove("STRATA_DATABASE")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute strata with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn project_with_config() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("strata.yml"),
        "migrations_dir: migrations\ndatabase:\n  path: app.duckdb\n",
    )
    .unwrap();
    fs::create_dir_all(tmp.path().join("migrations")).unwrap();
    tmp
}

fn write_migration(project: &Path, file: &str, content: &str) {
    fs::write(project.join("migrations").join(file), content).unwrap();
}

fn seed(project: &Path) {
    write_migration(
        project,
        "20240101_120000_create_users.sql",
        "CREATE TABLE users (id INTEGER);\n\n-- DOWN\nDROP TABLE users;",
    );
    write_migration(
        project,
        "20240102_120000_create_posts.sql",
        "CREATE TABLE posts (id INTEGER);\n\n-- DOWN\nDROP TABLE posts;",
    );
    write_migration(
        project,
        "20240103_120000_create_tags.sql",
        "CREATE TABLE tags (id INTEGER);\n\n-- DOWN\nDROP TABLE tags;",
    );
}

// ── up / status ────────────────────────────────────────────────────────

#[test]
fn test_status_on_empty_project() {
    let tmp = project_with_config();
    let (stdout, stderr, ok) = run_strata(tmp.path(), &["status"]);

    assert!(ok, "status failed: {stderr}");
    assert!(stdout.contains("Applied migrations: 0"), "{stdout}");
    assert!(stdout.contains("Pending migrations: 0"), "{stdout}");
    assert!(stdout.contains("Latest applied: none"), "{stdout}");
}

#[test]
fn test_up_then_status() {
    let tmp = project_with_config();
    seed(tmp.path());

    let (stdout, stderr, ok) = run_strata(tmp.path(), &["up", "--target", "20240102_120000"]);
    assert!(ok, "up failed: {stderr}");
    assert!(stdout.contains("20240101_120000 - Create Users"), "{stdout}");
    assert!(stdout.contains("20240102_120000 - Create Posts"), "{stdout}");
    assert!(!stdout.contains("20240103_120000"), "{stdout}");
    assert!(stdout.contains("Migration completed successfully"), "{stdout}");

    let (stdout, _, ok) = run_strata(tmp.path(), &["status"]);
    assert!(ok);
    assert!(stdout.contains("Applied migrations: 2"), "{stdout}");
    assert!(stdout.contains("Pending migrations: 1"), "{stdout}");
    assert!(stdout.contains("Latest applied: 20240102_120000"), "{stdout}");
}

#[test]
fn test_up_dry_run_changes_nothing() {
    let tmp = project_with_config();
    seed(tmp.path());

    let (stdout, stderr, ok) = run_strata(tmp.path(), &["up", "--dry-run"]);
    assert!(ok, "dry run failed: {stderr}");
    assert!(stdout.contains("Would apply 3 migration(s)"), "{stdout}");
    assert!(
        stdout.contains("Migration 20240101_120000: Create Users"),
        "{stdout}"
    );

    let (stdout, _, _) = run_strata(tmp.path(), &["status"]);
    assert!(stdout.contains("Pending migrations: 3"), "{stdout}");
}

#[test]
fn test_up_failure_exits_nonzero_and_reports_progress() {
    let tmp = project_with_config();
    write_migration(
        tmp.path(),
        "20240101_120000_ok.sql",
        "CREATE TABLE a (id INTEGER);",
    );
    write_migration(
        tmp.path(),
        "20240102_120000_broken.sql",
        "INSERT INTO missing_table VALUES (1);",
    );
    write_migration(
        tmp.path(),
        "20240103_120000_never.sql",
        "CREATE TABLE c (id INTEGER);",
    );

    let (stdout, stderr, ok) = run_strata(tmp.path(), &["up"]);
    assert!(!ok);
    assert!(stdout.contains("20240101_120000 - Ok"), "{stdout}");
    assert!(stdout.contains("20240102_120000"), "{stdout}");
    assert!(!stdout.contains("20240103_120000"), "{stdout}");
    assert!(stderr.contains("[M002]"), "{stderr}");

    let (stdout, _, _) = run_strata(tmp.path(), &["status"]);
    assert!(stdout.contains("Applied migrations: 1"), "{stdout}");
}

// ── down ───────────────────────────────────────────────────────────────

#[test]
fn test_down_rolls_back_newest_first() {
    let tmp = project_with_config();
    seed(tmp.path());
    let (_, stderr, ok) = run_strata(tmp.path(), &["up"]);
    assert!(ok, "up failed: {stderr}");

    let (stdout, stderr, ok) = run_strata(tmp.path(), &["down", "20240101_120000"]);
    assert!(ok, "down failed: {stderr}");
    let tags = stdout.find("20240103_120000").unwrap();
    let posts = stdout.find("20240102_120000").unwrap();
    assert!(tags < posts, "{stdout}");
    assert!(stdout.contains("Rollback completed successfully"), "{stdout}");

    let (stdout, _, _) = run_strata(tmp.path(), &["status"]);
    assert!(stdout.contains("Applied migrations: 1"), "{stdout}");
}

#[test]
fn test_down_without_rollback_sql_fails() {
    let tmp = project_with_config();
    write_migration(
        tmp.path(),
        "20240101_120000_base.sql",
        "CREATE TABLE base (id INTEGER);\n-- DOWN\nDROP TABLE base;",
    );
    write_migration(
        tmp.path(),
        "20240102_120000_one_way.sql",
        "CREATE TABLE one_way (id INTEGER);",
    );
    run_strata(tmp.path(), &["up"]);

    let (_, stderr, ok) = run_strata(tmp.path(), &["down", "20240101_120000"]);
    assert!(!ok);
    assert!(stderr.contains("[M004]"), "{stderr}");

    let (stdout, _, _) = run_strata(tmp.path(), &["status"]);
    assert!(stdout.contains("Applied migrations: 2"), "{stdout}");
}

#[test]
fn test_down_requires_target() {
    let tmp = project_with_config();
    let (_, _, ok) = run_strata(tmp.path(), &["down"]);
    assert!(!ok);
}

// ── status output / configuration ──────────────────────────────────────

#[test]
fn test_status_json() {
    let tmp = project_with_config();
    seed(tmp.path());
    run_strata(tmp.path(), &["up", "--target", "20240101_120000"]);

    let (stdout, stderr, ok) = run_strata(tmp.path(), &["status", "--output", "json", "-v"]);
    assert!(ok, "status failed: {stderr}");

    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["applied_count"], 1);
    assert_eq!(json["pending_count"], 2);
    assert_eq!(json["latest_applied"], "20240101_120000");
    assert_eq!(json["ledger_available"], true);
    assert_eq!(json["records"][0]["name"], "Create Users");
    assert_eq!(json["records"][0]["checksum"].as_str().unwrap().len(), 64);
}

#[test]
fn test_missing_database_is_reported() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, ok) = run_strata(tmp.path(), &["status"]);

    assert!(!ok);
    assert!(stderr.contains("[E008]"), "{stderr}");
    assert!(!tmp.path().join("migrations").exists());
}

#[test]
fn test_database_flag_overrides_config() {
    let tmp = project_with_config();
    seed(tmp.path());
    let other = tmp.path().join("other.duckdb");

    let (_, stderr, ok) = run_strata(tmp.path(), &["--database", other.to_str().unwrap(), "up"]);
    assert!(ok, "up failed: {stderr}");
    assert!(other.exists());
    assert!(!tmp.path().join("app.duckdb").exists());
}

// ── create ─────────────────────────────────────────────────────────────

#[test]
fn test_create_without_database() {
    let tmp = TempDir::new().unwrap();

    let (stdout, stderr, ok) = run_strata(
        tmp.path(),
        &[
            "create",
            "Add Orders",
            "--up-sql",
            "CREATE TABLE orders (id INTEGER);",
            "--down-sql",
            "DROP TABLE orders;",
        ],
    );
    assert!(ok, "create failed: {stderr}");
    assert!(stdout.contains("Created migration file:"), "{stdout}");

    let files: Vec<String> = fs::read_dir(tmp.path().join("migrations"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("_add_orders.sql"), "{files:?}");

    let content = fs::read_to_string(tmp.path().join("migrations").join(&files[0])).unwrap();
    assert_eq!(
        content,
        "CREATE TABLE orders (id INTEGER);\n\n-- DOWN\nDROP TABLE orders;"
    );
}

#[test]
fn test_create_rejects_empty_name() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, ok) = run_strata(tmp.path(), &["create", "   ", "--up-sql", "SELECT 1"]);
    assert!(!ok);
    assert!(stderr.contains("[E009]"), "{stderr}");
}
