//! Configuration tests

use super::*;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(config, parsed);
}

#[test]
fn test_config_from_file() {
    let mut config = Config::default();
    config.output.format = OutputFormat::Json;
    config.sample.namespace = Some("talks".to_string());
    config.validation.filters.push("kubetalk.io/*".to_string());

    let temp_file = NamedTempFile::new().unwrap();
    config.save_to_file(temp_file.path()).unwrap();

    let loaded = Config::from_file(temp_file.path()).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_minimal_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("version: \"1.0\"\n").unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.output.crd_path, PathBuf::from("./config/crd/bases"));
    assert_eq!(config.sample.name, "kubetalk-sample");
}

#[test]
fn test_config_validation() {
    assert!(Config::default().validate().is_ok());

    let mut config = Config::default();
    config.version = "2.0".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.sample.name = "Not_Valid".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.validation.filters.push("kubetalk.io/[".to_string());
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.output.crd_path = PathBuf::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_output_format_parsing() {
    assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
    assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert!("toml".parse::<OutputFormat>().is_err());
}

#[test]
fn test_output_format_render() {
    let value = serde_json::json!({"a": 1});
    assert_eq!(OutputFormat::Yaml.render(&value).unwrap(), "a: 1\n");
    assert_eq!(OutputFormat::Json.render(&value).unwrap(), "{\n  \"a\": 1\n}\n");
}
