// Configuration loading tests

use std::io::Write;

use imgproxy_url::{Error, ProxyConfig, UrlBuilder};

#[test]
fn test_can_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "base_url: https://img.onelitefeather.net/\nkey: c2VjcmV0\nsalt: aGVsbG8="
    )
    .unwrap();

    let config = ProxyConfig::from_file(file.path()).unwrap();
    assert_eq!(config.normalized_base_url(), "https://img.onelitefeather.net");

    let builder = UrlBuilder::new(&config).unwrap();
    assert!(builder.signing_enabled());
}

#[test]
fn test_missing_config_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ProxyConfig::from_file(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_invalid_yaml_is_rejected() {
    let result = ProxyConfig::from_yaml_with_env("base_url: [unterminated");
    assert!(matches!(result, Err(Error::Yaml(_))));
}

#[test]
fn test_malformed_secrets_are_startup_errors() {
    let config = ProxyConfig::new("https://img.onelitefeather.net").with_signing("***", "aGVsbG8=");
    let err = UrlBuilder::new(&config).unwrap_err();
    assert!(err.is_config_error());
}

#[test]
fn test_config_serializes_without_absent_secrets() {
    let yaml = serde_yaml::to_string(&ProxyConfig::new("https://img.onelitefeather.net")).unwrap();
    assert!(yaml.contains("base_url"));
    assert!(!yaml.contains("key"));
    assert!(!yaml.contains("salt"));
}
