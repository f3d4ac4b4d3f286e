// Test configuration loading
use clap::Parser;
use ct_subfinder::cli::Cli;
use ct_subfinder::config::Config;
use std::path::Path;

#[test]
fn test_load_test_config() {
    let config_path = Path::new("tests/test_config.toml");
    let config = Config::from_file(config_path).expect("Failed to load test config");

    // Verify search config
    assert_eq!(
        config.search.api_root,
        "http://127.0.0.1:8080/transparencyreport/api/v3"
    );
    assert_eq!(config.search.page_limit, 4);
    assert!(config.search.include_expired);
    assert_eq!(config.search.timeout_secs, 10);
    assert_eq!(config.search.user_agent, "ct-subfinder-test/1.0");
    assert!(!config.search.strict_certificates);

    // Verify logging config
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_cli_overrides_config_file() {
    let mut config = Config::from_file(Path::new("tests/test_config.toml")).unwrap();

    let cli = Cli::parse_from([
        "ct-subfinder",
        "example.com",
        "--limit",
        "20",
        "--strict",
        "--api-root",
        "http://localhost:9000/api",
        "-q",
    ]);
    cli.apply_overrides(&mut config);

    assert!(config.validate().is_ok());
    assert_eq!(config.search.page_limit, 20);
    assert!(config.search.strict_certificates);
    assert_eq!(config.search.api_root, "http://localhost:9000/api");
    // Not given on the command line, so the file value stays
    assert!(config.search.include_expired);
    assert_eq!(cli.log_level(&config.logging.level), "warn");
}

#[test]
fn test_defaults_without_config_file() {
    let mut config = Config::default();
    let cli = Cli::parse_from(["ct-subfinder", "example.com"]);
    cli.apply_overrides(&mut config);

    assert!(config.validate().is_ok());
    assert_eq!(config.search.page_limit, 10);
    assert!(!config.search.include_expired);
    assert_eq!(cli.log_level(&config.logging.level), "info");
}
