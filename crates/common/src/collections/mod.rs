//! Specialized data structures
//!
//! - **[`lru_cache`]**: bounded recency (LRU) cache with `O(1)` promotion
//! - **[`shared`]**: lock-protected handle for sharing one LRU cache across
//!   threads (`runtime` feature)
//!
//! ## Usage
//!
//! ```rust
//! use std::num::NonZeroUsize;
//!
//! use byt_common::collections::LruCache;
//!
//! let mut cache = LruCache::new(NonZeroUsize::new(16).unwrap());
//! cache.set("placeholder-1", Some("LEHV6nWB2yk8pyo0adR*.7kCMdnj"));
//! assert!(cache.contains(&"placeholder-1"));
//! ```

pub mod lru_cache;
#[cfg(feature = "runtime")]
pub mod shared;

// Re-export commonly used types
pub use lru_cache::LruCache;
#[cfg(feature = "runtime")]
pub use shared::SharedLruCache;
