//! Configuration management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::ImageSize;

use crate::constants::{
    DEFAULT_MESSAGE_CACHE_CAPACITY, DEFAULT_PLACEHOLDER_CACHE_CAPACITY, FOAAS_BASE_URL,
    UNSPLASH_BASE_URL, UNSPLASH_ORIENTATION, UNSPLASH_TOPIC,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub foaas: FoaasConfig,
    pub unsplash: UnsplashConfig,
    pub http: HttpConfig,
    pub storage: StorageConfig,
    pub cache: CacheConfig,
    pub images: ImagesConfig,
}

/// FOAAS endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoaasConfig {
    pub base_url: String,
}

impl Default for FoaasConfig {
    fn default() -> Self {
        Self { base_url: FOAAS_BASE_URL.to_string() }
    }
}

/// Unsplash endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnsplashConfig {
    pub base_url: String,
    #[serde(skip_serializing)]
    pub access_key: Option<String>,
    pub topic: String,
    pub orientation: String,
}

impl Default for UnsplashConfig {
    fn default() -> Self {
        Self {
            base_url: UNSPLASH_BASE_URL.to_string(),
            access_key: None,
            topic: UNSPLASH_TOPIC.to_string(),
            orientation: UNSPLASH_ORIENTATION.to_string(),
        }
    }
}

/// Outbound HTTP behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub max_attempts: usize,
    pub base_backoff_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_seconds: 30, max_attempts: 3, base_backoff_ms: 200 }
    }
}

/// Where fetched data and downloaded images live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Directory holding the JSON key-value blobs.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    /// Directory holding downloaded image files.
    pub fn image_dir(&self) -> PathBuf {
        self.data_dir.join("images")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from(".byt") }
    }
}

/// In-memory cache sizing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub message_capacity: usize,
    pub placeholder_capacity: usize,
    pub clear_on_memory_pressure: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            message_capacity: DEFAULT_MESSAGE_CACHE_CAPACITY,
            placeholder_capacity: DEFAULT_PLACEHOLDER_CACHE_CAPACITY,
            clear_on_memory_pressure: true,
        }
    }
}

/// Render size requested for downloaded backgrounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub width: u32,
    pub height: u32,
    pub scale: u8,
}

impl ImagesConfig {
    /// Size handed to the photo API. A zero scale is treated as 1x.
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height, self.scale)
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        let size = ImageSize::default();
        Self { width: size.width, height: size.height, scale: size.scale }
    }
}
