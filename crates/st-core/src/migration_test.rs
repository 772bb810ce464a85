use super::*;

#[test]
fn test_parse_complete_migration() {
    let content = "-- Test migration\nCREATE TABLE test (id INTEGER);\n\n-- DOWN\nDROP TABLE test;";
    let migration = Migration::parse("20240101_120000_test_migration", content).unwrap();

    assert_eq!(migration.version, "20240101_120000");
    assert_eq!(migration.name, "Test Migration");
    assert_eq!(
        migration.up_sql,
        "-- Test migration\nCREATE TABLE test (id INTEGER);"
    );
    assert_eq!(migration.down_sql, "DROP TABLE test;");
    assert!(migration.is_reversible());
}

#[test]
fn test_parse_up_only() {
    let content = "-- Test migration\nCREATE TABLE test (id INTEGER);\n";
    let migration = Migration::parse("20240101_120000_test_migration", content).unwrap();

    assert!(migration.up_sql.contains("CREATE TABLE test"));
    assert_eq!(migration.down_sql, "");
    assert!(!migration.is_reversible());
}

#[test]
fn test_parse_invalid_name_is_error_not_panic() {
    let err = Migration::parse("invalid_name", "CREATE TABLE test (id INTEGER);").unwrap_err();
    assert!(matches!(err, CoreError::MalformedMigrationName { .. }));

    assert!(Migration::parse("nounderscores", "SELECT 1").is_err());
    assert!(Migration::parse("", "SELECT 1").is_err());
}

#[test]
fn test_parse_version_and_name_extraction() {
    let cases = [
        ("20240101_120000_create_users", "20240101_120000", "Create Users"),
        ("20231231_235959_add_index_on_email", "20231231_235959", "Add Index On Email"),
        ("20240102_000000_x", "20240102_000000", "X"),
        ("20240103_101010_UPPER_case", "20240103_101010", "Upper Case"),
        ("20240104_111111_add_2fa_columns", "20240104_111111", "Add 2Fa Columns"),
    ];
    for (stem, version, name) in cases {
        let (v, n) = parse_file_stem(stem).unwrap();
        assert_eq!(v, version, "version for {stem}");
        assert_eq!(n, name, "name for {stem}");
    }
}

#[test]
fn test_only_first_down_marker_splits() {
    let content = "CREATE TABLE a (id INT);\n-- DOWN\nDROP TABLE a;\n-- DOWN\nSELECT 1;";
    let (up, down) = split_content(content);
    assert_eq!(up, "CREATE TABLE a (id INT);");
    assert_eq!(down, "DROP TABLE a;\n-- DOWN\nSELECT 1;");
}

#[test]
fn test_split_trims_whitespace() {
    let (up, down) = split_content("\n\n  SELECT 1;  \n\n-- DOWN\n\n  SELECT 2;\n\n");
    assert_eq!(up, "SELECT 1;");
    assert_eq!(down, "SELECT 2;");
}

#[test]
fn test_display() {
    let migration = Migration::new(
        MigrationVersion::try_from("20240101_120000").unwrap(),
        "Test Migration",
        "CREATE TABLE test (id INTEGER);",
        "",
    );
    assert_eq!(
        migration.to_string(),
        "Migration 20240101_120000: Test Migration"
    );
}

#[test]
fn test_checksum_tracks_up_sql() {
    let a = Migration::parse("20240101_120000_a", "SELECT 1;\n-- DOWN\nSELECT 2;").unwrap();
    let b = Migration::parse("20240101_120000_a", "SELECT 1;\n-- DOWN\nSELECT 3;").unwrap();
    assert_eq!(a.checksum(), b.checksum());
    assert_eq!(a.checksum(), compute_checksum("SELECT 1;"));
}
