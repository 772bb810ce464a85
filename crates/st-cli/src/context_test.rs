use super::*;
use std::fs;
use tempfile::TempDir;

fn global(project_dir: &Path, database: Option<&str>) -> GlobalArgs {
    GlobalArgs {
        verbose: false,
        project_dir: project_dir.display().to_string(),
        config: None,
        database: database.map(String::from),
    }
}

#[test]
fn test_defaults_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let ctx = ProjectContext::load(&global(tmp.path(), None)).unwrap();

    assert_eq!(ctx.config.migrations_dir, "migrations");
    assert_eq!(ctx.directory().path(), tmp.path().join("migrations"));
}

#[test]
fn test_missing_database_is_misconfigured() {
    let tmp = TempDir::new().unwrap();
    let ctx = ProjectContext::load(&global(tmp.path(), None)).unwrap();

    let err = ctx.database_target().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::MisconfiguredDatabase)
    ));
    assert!(ctx.migrator().is_err());
}

#[test]
fn test_config_database_is_relative_to_project() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("strata.yml"),
        "migrations_dir: db/migrations\ndatabase:\n  path: data/app.duckdb\n",
    )
    .unwrap();

    let ctx = ProjectContext::load(&global(tmp.path(), None)).unwrap();

    assert_eq!(
        ctx.database_target().unwrap(),
        tmp.path().join("data/app.duckdb").display().to_string()
    );
    assert_eq!(ctx.directory().path(), tmp.path().join("db/migrations"));
}

#[test]
fn test_override_wins_over_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("strata.yml"),
        "database:\n  path: data/app.duckdb\n",
    )
    .unwrap();

    let ctx = ProjectContext::load(&global(tmp.path(), Some(":memory:"))).unwrap();
    assert_eq!(ctx.database_target().unwrap(), ":memory:");
}

#[test]
fn test_invalid_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("strata.yml"), "unknown_key: true\n").unwrap();

    assert!(ProjectContext::load(&global(tmp.path(), None)).is_err());
}
