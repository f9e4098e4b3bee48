use std::fs;

use tempfile::TempDir;
use theorydata_core::config::{
    DEFAULT_ARGS_MODE, DEFAULT_CASE_EXTENSIONS, DEFAULT_EXPECTED_POLICY, DEFAULT_LOG_FILTER,
};
use theorydata_core::{ArgsMode, Config, ConfigError, ExpectedPolicy};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.conversion.mode, DEFAULT_ARGS_MODE);
    assert_eq!(config.conversion.expected, DEFAULT_EXPECTED_POLICY);
    assert_eq!(config.cases.extensions, DEFAULT_CASE_EXTENSIONS);
    assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
}

#[test]
fn test_config_to_toml() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("[conversion]"));
    assert!(toml_str.contains("[cases]"));
    assert!(toml_str.contains("[logging]"));

    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_config_from_toml() {
    let toml_str = r#"
[conversion]
mode = "flattened"
expected = "trim"

[naming]
method_name = "Add_Test"

[cases]
extensions = ["yaml"]

[logging]
filter = "theorydata_core=debug"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.conversion.mode, ArgsMode::Flattened);
    assert_eq!(config.conversion.expected, ExpectedPolicy::Trim);
    assert_eq!(config.naming.method_name.as_deref(), Some("Add_Test"));
    assert_eq!(config.cases.extensions, vec!["yaml".to_string()]);
    assert_eq!(config.logging.filter, "theorydata_core=debug");
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config: Config = toml::from_str("[conversion]\nmode = \"flattened\"\n").unwrap();
    assert_eq!(config.conversion.mode, ArgsMode::Flattened);
    assert_eq!(config.conversion.expected, DEFAULT_EXPECTED_POLICY);
    assert_eq!(config.cases.extensions, DEFAULT_CASE_EXTENSIONS);
}

#[test]
fn test_unknown_mode_is_a_parse_error() {
    let result: Result<Config, _> = toml::from_str("[conversion]\nmode = \"sideways\"\n");
    assert!(result.is_err());
}

#[test]
fn test_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("theorydata.toml");
    fs::write(&path, "[cases]\nextensions = [\"json\"]\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert_eq!(config.cases.extensions, vec!["json".to_string()]);
}

#[test]
fn test_config_from_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = Config::from_file(temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError(_)));
}

#[test]
fn test_config_from_malformed_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("theorydata.toml");
    fs::write(&path, "[conversion\nmode = ").unwrap();

    let err = Config::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}
