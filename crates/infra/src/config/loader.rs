//! Configuration loader
//!
//! Loads application configuration from environment variables and files.
//!
//! ## Loading Strategy
//! 1. Start from the first config file found by [`probe_config_paths`], or
//!    from [`Config::default`] when there is none
//! 2. Apply `BYT_*` environment variables on top; they always win
//! 3. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `BYT_FOAAS_BASE_URL`: FOAAS endpoint
//! - `BYT_UNSPLASH_BASE_URL`: Unsplash endpoint
//! - `BYT_UNSPLASH_ACCESS_KEY`: Unsplash client id
//! - `BYT_UNSPLASH_TOPIC`: Unsplash topic id for random photos
//! - `BYT_HTTP_TIMEOUT`: Request timeout in seconds
//! - `BYT_HTTP_MAX_ATTEMPTS`: Attempts per request (initial try + retries)
//! - `BYT_DATA_DIR`: Directory for stored data and downloaded images
//! - `BYT_MESSAGE_CACHE_CAPACITY`: Rendered messages kept in memory
//! - `BYT_PLACEHOLDER_CACHE_CAPACITY`: Blur-hash placeholders kept in memory
//! - `BYT_CLEAR_CACHE_ON_MEMORY_PRESSURE`: Whether caches empty under memory
//!   pressure (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./byt.toml` or `./byt.json` (current working directory)
//! 2. `./config.toml` or `./config.json` (current working directory)
//! 3. `$XDG_CONFIG_HOME/byt/config.toml` (or `~/.config/byt/config.toml`)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use byt_domain::{BytError, Config, Result};

use crate::errors::InfraError;

/// Load configuration: file (if any) overlaid with environment variables.
///
/// # Errors
/// Returns `BytError::Config` if a probed file exists but cannot be parsed,
/// or an environment variable holds an invalid value.
pub fn load() -> Result<Config> {
    let base = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(base)
}

/// Defaults overlaid with environment variables; no files are read.
pub fn load_from_env() -> Result<Config> {
    apply_env_overrides(Config::default())
}

/// Overlay every `BYT_*` variable that is set onto `config`.
///
/// # Errors
/// Returns `BytError::Config` when a numeric variable does not parse.
pub fn apply_env_overrides(mut config: Config) -> Result<Config> {
    if let Some(url) = env_string("BYT_FOAAS_BASE_URL") {
        config.foaas.base_url = url;
    }
    if let Some(url) = env_string("BYT_UNSPLASH_BASE_URL") {
        config.unsplash.base_url = url;
    }
    if let Some(key) = env_string("BYT_UNSPLASH_ACCESS_KEY") {
        config.unsplash.access_key = Some(key);
    }
    if let Some(topic) = env_string("BYT_UNSPLASH_TOPIC") {
        config.unsplash.topic = topic;
    }
    if let Some(timeout) = env_parse("BYT_HTTP_TIMEOUT")? {
        config.http.timeout_seconds = timeout;
    }
    if let Some(attempts) = env_parse("BYT_HTTP_MAX_ATTEMPTS")? {
        config.http.max_attempts = attempts;
    }
    if let Some(dir) = env_string("BYT_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(dir);
    }
    if let Some(capacity) = env_parse("BYT_MESSAGE_CACHE_CAPACITY")? {
        config.cache.message_capacity = capacity;
    }
    if let Some(capacity) = env_parse("BYT_PLACEHOLDER_CACHE_CAPACITY")? {
        config.cache.placeholder_capacity = capacity;
    }
    config.cache.clear_on_memory_pressure =
        env_bool("BYT_CLEAR_CACHE_ON_MEMORY_PRESSURE", config.cache.clear_on_memory_pressure);
    if let Some(width) = env_parse("BYT_IMAGE_WIDTH")? {
        config.images.width = width;
    }
    if let Some(height) = env_parse("BYT_IMAGE_HEIGHT")? {
        config.images.height = height;
    }
    if let Some(scale) = env_parse("BYT_IMAGE_SCALE")? {
        config.images.scale = scale;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `BytError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(BytError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            BytError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| BytError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| BytError::from(InfraError::from(e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| BytError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(BytError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    let config_home = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));
    if let Some(config_home) = config_home {
        let dir = config_home.join("byt");
        candidates.push(dir.join("config.toml"));
        candidates.push(dir.join("config.json"));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> [PathBuf; 4] {
    [dir.join("byt.toml"), dir.join("byt.json"), dir.join("config.toml"), dir.join("config.json")]
}

/// Non-empty environment variable
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse an optional environment variable
///
/// # Errors
/// Returns `BytError::Config` if the variable is set but does not parse.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_string(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|e| BytError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::{Builder, TempDir};

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const ALL_VARS: [&str; 13] = [
        "BYT_FOAAS_BASE_URL",
        "BYT_UNSPLASH_BASE_URL",
        "BYT_UNSPLASH_ACCESS_KEY",
        "BYT_UNSPLASH_TOPIC",
        "BYT_HTTP_TIMEOUT",
        "BYT_HTTP_MAX_ATTEMPTS",
        "BYT_DATA_DIR",
        "BYT_MESSAGE_CACHE_CAPACITY",
        "BYT_PLACEHOLDER_CACHE_CAPACITY",
        "BYT_CLEAR_CACHE_ON_MEMORY_PRESSURE",
        "BYT_IMAGE_WIDTH",
        "BYT_IMAGE_HEIGHT",
        "BYT_IMAGE_SCALE",
    ];

    fn clear_env() {
        for key in ALL_VARS {
            std::env::remove_var(key);
        }
    }

    fn write_config(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("BYT_TEST_BOOL_TRUE", "Yes");
        std::env::set_var("BYT_TEST_BOOL_FALSE", "off");
        std::env::remove_var("BYT_TEST_BOOL_MISSING");

        assert!(env_bool("BYT_TEST_BOOL_TRUE", false));
        assert!(!env_bool("BYT_TEST_BOOL_FALSE", true));
        assert!(env_bool("BYT_TEST_BOOL_MISSING", true));

        std::env::remove_var("BYT_TEST_BOOL_TRUE");
        std::env::remove_var("BYT_TEST_BOOL_FALSE");
    }

    #[test]
    fn test_load_from_env_defaults_when_unset() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let config = load_from_env().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_env_all_vars_set() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("BYT_FOAAS_BASE_URL", "http://localhost:3000");
        std::env::set_var("BYT_UNSPLASH_ACCESS_KEY", "client-id");
        std::env::set_var("BYT_HTTP_TIMEOUT", "5");
        std::env::set_var("BYT_HTTP_MAX_ATTEMPTS", "1");
        std::env::set_var("BYT_DATA_DIR", "/tmp/byt-test");
        std::env::set_var("BYT_MESSAGE_CACHE_CAPACITY", "4");
        std::env::set_var("BYT_CLEAR_CACHE_ON_MEMORY_PRESSURE", "false");

        let result = load_from_env();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.foaas.base_url, "http://localhost:3000");
        assert_eq!(config.unsplash.access_key.as_deref(), Some("client-id"));
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.http.max_attempts, 1);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/byt-test"));
        assert_eq!(config.cache.message_capacity, 4);
        assert!(!config.cache.clear_on_memory_pressure);
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        std::env::set_var("BYT_HTTP_TIMEOUT", "soon");
        let result = load_from_env();
        clear_env();

        let err = result.unwrap_err();
        assert!(matches!(err, BytError::Config(ref msg) if msg.contains("BYT_HTTP_TIMEOUT")));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "byt.toml",
            "[foaas]\nbase_url = \"http://file\"\n\n[cache]\nmessage_capacity = 9\n",
        );
        std::env::set_var("BYT_FOAAS_BASE_URL", "http://env");

        let result = load_from_file(Some(path)).and_then(apply_env_overrides);
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.foaas.base_url, "http://env");
        assert_eq!(config.cache.message_capacity, 9);
    }

    #[test]
    fn test_image_size_from_file_and_env() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_env();

        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "byt.toml", "[images]\nwidth = 640\nheight = 480\n");
        std::env::set_var("BYT_IMAGE_SCALE", "2");

        let result = load_from_file(Some(path)).and_then(apply_env_overrides);
        clear_env();

        let size = result.unwrap().images.size();
        assert_eq!((size.width, size.height, size.scale), (640, 480, 2));
    }

    #[test]
    fn test_load_from_file_json() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "config.json",
            r#"{ "unsplash": { "topic": "abc" }, "http": { "max_attempts": 5 } }"#,
        );

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.unsplash.topic, "abc");
        assert_eq!(config.http.max_attempts, 5);
        // Unspecified fields keep their defaults.
        assert_eq!(config.http.timeout_seconds, 30);
    }

    #[test]
    fn test_access_key_is_read_but_never_written() {
        let dir = TempDir::new().unwrap();
        let path =
            write_config(&dir, "byt.toml", "[unsplash]\naccess_key = \"secret\"\n");

        let config = load_from_file(Some(path)).unwrap();
        assert_eq!(config.unsplash.access_key.as_deref(), Some("secret"));
        assert!(!toml::to_string(&config).unwrap().contains("secret"));
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/byt.toml")));
        assert!(matches!(result, Err(BytError::Config(_))));
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[foaas\nbase_url = 1").unwrap();

        let result = load_from_file(Some(file.path().to_path_buf()));
        assert!(matches!(result, Err(BytError::Config(_))));
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", &PathBuf::from("test.yaml"));
        assert!(result.is_err(), "Should fail with unsupported format");
    }
}
