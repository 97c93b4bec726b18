use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;
use tidysched::utils::validation::Validate;
use tidysched::Cli;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn file_config_supplies_store_settings() {
    let file = write_config(
        r#"
[store]
base_url = "https://records.example.com/api"
api_key = "secret"
timeout_seconds = 10
"#,
    );

    let cli = Cli::parse_from([
        "tidysched",
        "--config",
        file.path().to_str().unwrap(),
        "generate",
        "--client-id",
        "cli-1",
    ]);

    let settings = cli.store_settings().unwrap();
    assert_eq!(settings.base_url, "https://records.example.com/api");
    assert_eq!(settings.api_key.as_deref(), Some("secret"));
    assert_eq!(settings.timeout_seconds, 10);
    assert!(settings.validate().is_ok());
}

#[test]
fn cli_flags_override_the_file() {
    let file = write_config(
        r#"
[store]
base_url = "https://records.example.com/api"
api_key = "file-key"
"#,
    );

    let cli = Cli::parse_from([
        "tidysched",
        "--config",
        file.path().to_str().unwrap(),
        "--base-url",
        "http://localhost:9090",
        "--api-key",
        "flag-key",
        "sync",
        "--client-id",
        "cli-1",
    ]);

    let settings = cli.store_settings().unwrap();
    assert_eq!(settings.base_url, "http://localhost:9090");
    assert_eq!(settings.api_key.as_deref(), Some("flag-key"));
}

#[test]
fn malformed_toml_is_rejected_with_context() {
    let file = write_config("[store\nbase_url = ");

    let cli = Cli::parse_from([
        "tidysched",
        "--config",
        file.path().to_str().unwrap(),
        "generate",
        "--client-id",
        "cli-1",
    ]);

    let err = cli.store_settings().unwrap_err();
    assert!(err.to_string().contains("Invalid TOML"));
}

#[test]
fn invalid_base_url_fails_validation() {
    let cli = Cli::parse_from([
        "tidysched",
        "--base-url",
        "ftp://records.example.com",
        "generate",
        "--client-id",
        "cli-1",
    ]);

    let settings = cli.store_settings().unwrap();
    assert!(settings.validate().is_err());
}
