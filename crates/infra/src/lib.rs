//! # BYT Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - HTTP client with retry and backoff
//! - FOAAS and Unsplash API clients
//! - File-backed key-value and image stores
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `byt-core`
//! - Depends on `byt-domain` and `byt-core`
//! - Contains all "impure" code (network and filesystem I/O)

pub mod config;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod storage;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use integrations::{FoaasClient, UnsplashClient};
pub use storage::{FileImageStore, JsonFileStore};
