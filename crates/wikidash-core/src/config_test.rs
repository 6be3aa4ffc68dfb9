use std::collections::HashMap;
use std::env::VarError;

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
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "WIKIDASH_ENV"));
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.pageviews_base_url, DEFAULT_PAGEVIEWS_BASE_URL);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "wikidash/0.1 (article-dashboard)");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("WIKIDASH_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WIKIDASH_BIND_ADDR"),
        "expected InvalidEnvVar(WIKIDASH_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_unknown_env() {
    let mut map = HashMap::new();
    map.insert("WIKIDASH_ENV", "staging");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WIKIDASH_ENV"),
        "expected InvalidEnvVar(WIKIDASH_ENV), got: {result:?}"
    );
}

#[test]
fn base_urls_can_be_overridden() {
    let mut map = HashMap::new();
    map.insert("WIKIDASH_API_BASE_URL", "http://127.0.0.1:9000/w/api.php");
    map.insert("WIKIDASH_PAGEVIEWS_BASE_URL", " http://127.0.0.1:9000/pageviews ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:9000/w/api.php");
    assert_eq!(cfg.pageviews_base_url, "http://127.0.0.1:9000/pageviews");
}

#[test]
fn base_url_without_scheme_is_rejected() {
    let mut map = HashMap::new();
    map.insert("WIKIDASH_API_BASE_URL", "en.wikipedia.org/w/api.php");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WIKIDASH_API_BASE_URL"),
        "expected InvalidEnvVar(WIKIDASH_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("WIKIDASH_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("WIKIDASH_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WIKIDASH_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(WIKIDASH_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("WIKIDASH_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WIKIDASH_REQUEST_TIMEOUT_SECS"
    ));
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("WIKIDASH_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}
