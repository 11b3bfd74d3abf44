//! # BYT Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The operation template path builder
//! - Port/adapter interfaces (traits)
//! - Services for operations, images and version tracking
//!
//! ## Architecture Principles
//! - Only depends on `byt-common` and `byt-domain`
//! - No filesystem, HTTP, or platform code
//! - All external dependencies via traits

use std::num::NonZeroUsize;

pub mod editing;
pub mod images;
pub mod operations;
pub mod ports;
pub mod version;

pub use editing::FoaasPathBuilder;
pub use images::{BlurHashPlaceholder, ImageLibrary};
pub use operations::OperationCatalog;
pub use ports::{FoaasApi, ImageStore, KeyValueStore, PhotoApi, PrefetchReport, StoreExt};
pub use version::{VersionEvent, VersionTracker};

/// Cache capacity from configuration; zero is bumped to one.
pub(crate) fn non_zero(capacity: usize) -> NonZeroUsize {
    NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)
}
