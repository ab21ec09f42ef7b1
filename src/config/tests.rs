//! Unit tests for configuration loading

use super::*;
use std::path::Path;

#[test]
fn test_parse_sqlite_uris() {
    assert_eq!(
        DatabaseLocation::parse("sqlite:///auction.db").unwrap(),
        DatabaseLocation::File(PathBuf::from("auction.db"))
    );
    assert_eq!(
        DatabaseLocation::parse("sqlite:///data/auction.db").unwrap(),
        DatabaseLocation::File(PathBuf::from("data/auction.db"))
    );
    assert_eq!(
        DatabaseLocation::parse("sqlite:////var/lib/auction.db").unwrap(),
        DatabaseLocation::File(PathBuf::from("/var/lib/auction.db"))
    );
    assert_eq!(
        DatabaseLocation::parse("sqlite:auction.db").unwrap(),
        DatabaseLocation::File(PathBuf::from("auction.db"))
    );
    assert_eq!(
        DatabaseLocation::parse("sqlite:///auction.db?mode=rwc").unwrap(),
        DatabaseLocation::File(PathBuf::from("auction.db"))
    );
}

#[test]
fn test_parse_memory_uris() {
    for uri in [":memory:", "sqlite::memory:", "sqlite://", "sqlite:///:memory:"] {
        assert_eq!(DatabaseLocation::parse(uri).unwrap(), DatabaseLocation::Memory);
    }
}

#[test]
fn test_parse_bare_path() {
    assert_eq!(
        DatabaseLocation::parse("  ./auction.db ").unwrap(),
        DatabaseLocation::File(PathBuf::from("./auction.db"))
    );
}

#[test]
fn test_parse_rejects_other_schemes() {
    match DatabaseLocation::parse("postgresql://user:pw@localhost/auction") {
        Err(AuctionError::Config { message }) => assert!(message.contains("postgresql")),
        other => panic!("Expected Config error, got {:?}", other),
    }
    assert!(DatabaseLocation::parse("").is_err());
    match DatabaseLocation::parse("sqlite://data/auction.db") {
        Err(AuctionError::Config { message }) => assert!(message.contains("host part")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[test]
fn test_display_round_trips_through_parse() {
    let file = DatabaseLocation::File(PathBuf::from("/tmp/auction.db"));
    assert_eq!(file.to_string(), "sqlite:////tmp/auction.db");
    assert_eq!(DatabaseLocation::parse(&file.to_string()).unwrap(), file);

    let relative = DatabaseLocation::File(PathBuf::from("data/auction.db"));
    assert_eq!(relative.to_string(), "sqlite:///data/auction.db");
    assert_eq!(DatabaseLocation::parse(&relative.to_string()).unwrap(), relative);
    assert_eq!(
        DatabaseLocation::parse(&DatabaseLocation::Memory.to_string()).unwrap(),
        DatabaseLocation::Memory
    );
}

#[test]
fn test_default_file_location() {
    if let Ok(DatabaseLocation::File(path)) = DatabaseLocation::default_file() {
        assert!(path.ends_with(Path::new("cricket-auction").join("auction.db")));
    }
}

#[test]
fn test_command_line_overrides_bind_address() {
    let config = AppConfig {
        database: DatabaseLocation::Memory,
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT,
    };

    let unchanged = config.clone().with_overrides(None, None);
    assert_eq!(unchanged.bind_address(), "127.0.0.1:5000");

    let overridden = config.with_overrides(Some("0.0.0.0".to_string()), Some(8000));
    assert_eq!(overridden.bind_address(), "0.0.0.0:8000");
}

#[test]
fn test_from_env() {
    std::env::set_var(DATABASE_URI_ENV_VAR, "sqlite::memory:");
    std::env::set_var(HOST_ENV_VAR, "0.0.0.0");
    std::env::set_var(PORT_ENV_VAR, "8080");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.database, DatabaseLocation::Memory);
    assert_eq!(config.bind_address(), "0.0.0.0:8080");

    std::env::set_var(PORT_ENV_VAR, "not-a-port");
    assert!(AppConfig::from_env().is_err());

    std::env::remove_var(HOST_ENV_VAR);
    std::env::remove_var(PORT_ENV_VAR);
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.host, DEFAULT_HOST);
    assert_eq!(config.port, DEFAULT_PORT);

    std::env::remove_var(DATABASE_URI_ENV_VAR);
}
