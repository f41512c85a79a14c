use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SAMARTH_ENV"));
}

#[test]
fn build_app_config_defaults_from_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.defaults_source,
        DefaultsSource::File(PathBuf::from("./data/products.json"))
    );
    assert_eq!(cfg.state_dir, PathBuf::from("./.samarth"));
    assert_eq!(cfg.storage_key, "samarth-overseas-products");
    assert!(cfg.contact_endpoint.is_none());
    assert_eq!(cfg.contact_email, "info@samarthoverseasindia.com");
    assert_eq!(cfg.http_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "samarth/0.1 (export-catalog)");
}

#[test]
fn build_app_config_fails_with_invalid_env() {
    let mut map = HashMap::new();
    map.insert("SAMARTH_ENV", "prod");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAMARTH_ENV"),
        "expected InvalidEnvVar(SAMARTH_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("SAMARTH_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAMARTH_BIND_ADDR"),
        "expected InvalidEnvVar(SAMARTH_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn http_timeout_override() {
    let mut map = HashMap::new();
    map.insert("SAMARTH_HTTP_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.http_timeout_secs, 5);
}

#[test]
fn http_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("SAMARTH_HTTP_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAMARTH_HTTP_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SAMARTH_HTTP_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn defaults_source_url_is_detected() {
    let mut map = HashMap::new();
    map.insert(
        "SAMARTH_DEFAULTS_SOURCE",
        "https://samarthoverseasindia.com/data/products.json",
    );
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(matches!(cfg.defaults_source, DefaultsSource::Url(_)));
}

#[test]
fn storage_key_with_path_separator_is_rejected() {
    let mut map = HashMap::new();
    map.insert("SAMARTH_STORAGE_KEY", "../escape");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SAMARTH_STORAGE_KEY"),
        "expected InvalidEnvVar(SAMARTH_STORAGE_KEY), got: {result:?}"
    );
}

#[test]
fn blank_contact_endpoint_is_treated_as_unset() {
    let mut map = HashMap::new();
    map.insert("SAMARTH_CONTACT_ENDPOINT", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.contact_endpoint.is_none());
}

#[test]
fn debug_redacts_contact_endpoint() {
    let mut map = HashMap::new();
    map.insert("SAMARTH_CONTACT_ENDPOINT", "https://forms.example.com/secret-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("secret-token"));
    assert!(debug.contains("[redacted]"));
}
