//! Modular common utilities shared across BYT crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: collections (default)
//! - `runtime`: lock-based shared collections
//! - `observability`: optional tracing (not included by default)

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod collections;

// Re-export commonly used types
// ------------------------
#[cfg(feature = "foundation")]
pub use collections::LruCache;
#[cfg(feature = "runtime")]
pub use collections::SharedLruCache;
