//! Photo API and local image store ports

use async_trait::async_trait;
use byt_domain::{ImageSize, Result, UnsplashImage};

/// Remote photo API (Unsplash).
#[async_trait]
pub trait PhotoApi: Send + Sync {
    /// One random photo rendered at `size`.
    async fn random_image(&self, size: ImageSize) -> Result<UnsplashImage>;

    /// `count` random photos rendered at `size`.
    async fn random_images(&self, size: ImageSize, count: usize) -> Result<Vec<UnsplashImage>>;
}

/// Outcome of a batch prefetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    /// Keys that are now available locally.
    pub completed: Vec<String>,
    /// Keys that could not be downloaded.
    pub failed: Vec<String>,
}

impl PrefetchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn succeeded(&self, key: &str) -> bool {
        self.completed.iter().any(|done| done == key)
    }
}

/// Local cache of downloaded image files, keyed by source URL.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// `true` when the image for `key` has been downloaded.
    async fn contains(&self, key: &str) -> bool;

    /// Download every URL not already present.
    async fn prefetch(&self, urls: &[String]) -> PrefetchReport;

    /// Drop every downloaded image.
    async fn clear(&self) -> Result<()>;
}
