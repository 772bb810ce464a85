use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_down_requires_target() {
    assert!(Cli::try_parse_from(["strata", "down"]).is_err());
    // An empty target would sort below every version and roll back everything.
    assert!(Cli::try_parse_from(["strata", "down", ""]).is_err());
}

#[test]
fn test_up_target_and_globals() {
    let cli = Cli::try_parse_from([
        "strata",
        "up",
        "--target",
        "20240102_120000",
        "--dry-run",
        "-d",
        "app.duckdb",
        "-v",
    ])
    .unwrap();

    assert!(cli.global.verbose);
    assert_eq!(cli.global.database.as_deref(), Some("app.duckdb"));
    match cli.command {
        Commands::Up(args) => {
            assert_eq!(args.target.as_deref(), Some("20240102_120000"));
            assert!(args.dry_run);
        }
        other => panic!("expected up, got {other:?}"),
    }
}

#[test]
fn test_create_down_sql_optional() {
    let cli = Cli::try_parse_from(["strata", "create", "add users", "--up-sql", "SELECT 1"])
        .unwrap();
    match cli.command {
        Commands::Create(args) => {
            assert_eq!(args.name, "add users");
            assert_eq!(args.up_sql, "SELECT 1");
            assert_eq!(args.down_sql, None);
        }
        other => panic!("expected create, got {other:?}"),
    }
}

#[test]
fn test_status_output_json() {
    let cli = Cli::try_parse_from(["strata", "status", "--output", "json"]).unwrap();
    match cli.command {
        Commands::Status(args) => assert_eq!(args.output, StatusOutput::Json),
        other => panic!("expected status, got {other:?}"),
    }
}
