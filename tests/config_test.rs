use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

use coursetrack::config::{Config, ConfigError, DEFAULT_DATABASE_URL, parse_origins};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_when_unset() {
    let config = Config::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(config.port, 3000);
    assert!(config.cors_origins.is_empty());
}

#[test]
fn values_are_read_from_environment() {
    let config = Config::from_lookup(lookup(&[
        ("DATABASE_URL", "sqlite://test.db"),
        ("HOST", "0.0.0.0"),
        ("PORT", "8080"),
        ("CORS_ORIGIN", "https://app.example.edu, http://localhost:3001,"),
    ]))
    .unwrap();

    assert_eq!(config.database_url, "sqlite://test.db");
    assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
    assert_eq!(
        config.cors_origins,
        vec!["https://app.example.edu", "http://localhost:3001"]
    );
}

#[test]
fn invalid_port_is_rejected() {
    let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();

    assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
}

#[test]
fn blank_origins_are_dropped() {
    assert!(parse_origins(" , ,").is_empty());
    assert_eq!(parse_origins("a,b"), vec!["a", "b"]);
}
