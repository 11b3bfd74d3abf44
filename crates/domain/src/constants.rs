//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Remote services
pub const FOAAS_BASE_URL: &str = "https://foaas.onrender.com";
pub const UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";
pub const UNSPLASH_TOPIC: &str = "bo8jQKTaE0Y";
pub const UNSPLASH_ORIENTATION: &str = "portrait";
pub const UNSPLASH_API_VERSION: &str = "v1";
pub const FOAAS_OPERATIONS_PATH: &str = "/operations";
pub const FOAAS_MESSAGE_OF_THE_DAY_PATH: &str = "/mod";
pub const UNSPLASH_RANDOM_PHOTO_PATH: &str = "/photos/random";
pub const PLATFORM_TYPE: &str = "cli";

// Storage keys
pub const OPERATIONS_KEY: &str = "com.byt.ops";
pub const IMAGES_KEY: &str = "com.byt.upsplash-images";
pub const VERSION_KEY: &str = "com.byt.version.key";

// Image library
pub const DEFAULT_DOWNLOAD_SIZE: usize = 4;
pub const AVAILABLE_IMAGES_BATCH: usize = 20;
pub const MAX_RANDOM_IMAGES: usize = 30;

// In-memory caches
pub const DEFAULT_MESSAGE_CACHE_CAPACITY: usize = 32;
pub const DEFAULT_PLACEHOLDER_CACHE_CAPACITY: usize = 8;

// Versioning
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_VERSION_MESSAGE: &str = "Made with 🤖";

// Template syntax
pub const TOKEN_DELIMITER: &str = "/:";
pub const TOKEN_PREFIX: char = ':';
