use hwpulse::core::config::{Config, Layout, ServerConfig, DEFAULT_SERVER_URL};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.layout, Layout::Grid);
    assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hwpulse").join("config.json");

    let config = Config {
        layout: Layout::List,
        server_url: Some("http://192.168.1.20:8000".to_string()),
    };
    config.save_to(&path).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"list\""));
    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_config_unknown_layout_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{"layout":"carousel"}"#).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_config_empty_file_is_default() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, "").unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_server_defaults() {
    let server = ServerConfig::default();
    assert_eq!(server.bind.to_string(), "127.0.0.1:8000");
    assert_eq!(server.probe_timeout, Duration::from_secs(2));
}
