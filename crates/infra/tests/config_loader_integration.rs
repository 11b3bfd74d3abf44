//! Integration tests for configuration loader
//!
//! Tests the end-to-end behavior of loading configuration from files.

use std::io::Write;
use std::path::PathBuf;

use byt_infra::config;
use tempfile::Builder;

#[test]
fn test_load_config_from_toml_file() {
    let toml_content = r#"
[foaas]
base_url = "http://localhost:8080"

[unsplash]
topic = "nature"
orientation = "landscape"

[http]
timeout_seconds = 10
max_attempts = 2
base_backoff_ms = 50

[storage]
data_dir = "/var/lib/byt"

[cache]
message_capacity = 64
placeholder_capacity = 4
clear_on_memory_pressure = false
"#;

    let mut temp_file = Builder::new().suffix(".toml").tempfile().expect("temp file");
    temp_file.write_all(toml_content.as_bytes()).expect("write temp file");

    let config = config::load_from_file(Some(temp_file.path().to_path_buf()))
        .expect("load config from TOML file");

    assert_eq!(config.foaas.base_url, "http://localhost:8080");
    assert_eq!(config.unsplash.topic, "nature");
    assert_eq!(config.unsplash.orientation, "landscape");
    assert_eq!(config.unsplash.access_key, None);
    assert_eq!(config.http.timeout_seconds, 10);
    assert_eq!(config.http.max_attempts, 2);
    assert_eq!(config.http.base_backoff_ms, 50);
    assert_eq!(config.storage.store_dir(), PathBuf::from("/var/lib/byt/store"));
    assert_eq!(config.storage.image_dir(), PathBuf::from("/var/lib/byt/images"));
    assert_eq!(config.cache.message_capacity, 64);
    assert_eq!(config.cache.placeholder_capacity, 4);
    assert!(!config.cache.clear_on_memory_pressure);
}

#[test]
fn test_empty_json_file_yields_defaults() {
    let mut temp_file = Builder::new().suffix(".json").tempfile().expect("temp file");
    temp_file.write_all(b"{}").expect("write temp file");

    let config = config::load_from_file(Some(temp_file.path().to_path_buf()))
        .expect("load config from JSON file");

    assert_eq!(config, byt_domain::Config::default());
}
