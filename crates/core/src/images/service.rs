//! Image library service - core business logic

use std::sync::Arc;

use byt_common::collections::{LruCache, SharedLruCache};
use byt_domain::constants::{
    AVAILABLE_IMAGES_BATCH, DEFAULT_DOWNLOAD_SIZE, DEFAULT_PLACEHOLDER_CACHE_CAPACITY, IMAGES_KEY,
};
use byt_domain::{ImageSize, Result, UnsplashImage};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::non_zero;
use crate::ports::{ImageStore, KeyValueStore, PhotoApi, StoreExt};

/// Render size used when decoding blur-hash placeholders.
const PLACEHOLDER_WIDTH: u32 = 275;
const PLACEHOLDER_HEIGHT: u32 = 450;

/// What a front end needs to render a blurred stand-in while the real image
/// loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurHashPlaceholder {
    pub image_id: String,
    pub blur_hash: String,
    pub width: u32,
    pub height: u32,
}

impl BlurHashPlaceholder {
    fn for_image(image: &UnsplashImage) -> Self {
        Self {
            image_id: image.id.clone(),
            blur_hash: image.blur_hash.clone(),
            width: PLACEHOLDER_WIDTH,
            height: PLACEHOLDER_HEIGHT,
        }
    }
}

/// Keeps a small set of downloaded Unsplash photos around for backgrounds.
///
/// Every change to the cached set is written through to the key-value store.
pub struct ImageLibrary {
    api: Arc<dyn PhotoApi>,
    store: Arc<dyn KeyValueStore>,
    images: Arc<dyn ImageStore>,
    size: ImageSize,
    cached: RwLock<Vec<UnsplashImage>>,
    placeholders: SharedLruCache<String, BlurHashPlaceholder>,
}

impl ImageLibrary {
    /// Library rendering photos at the default size, with a placeholder cache
    /// of the default capacity. The cached set starts empty until
    /// [`ImageLibrary::initialize`] runs.
    pub fn new(
        api: Arc<dyn PhotoApi>,
        store: Arc<dyn KeyValueStore>,
        images: Arc<dyn ImageStore>,
    ) -> Self {
        Self {
            api,
            store,
            images,
            size: ImageSize::default(),
            cached: RwLock::new(Vec::new()),
            placeholders: SharedLruCache::new(non_zero(DEFAULT_PLACEHOLDER_CACHE_CAPACITY)),
        }
    }

    /// Request photos rendered for `size`.
    pub fn with_image_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    /// Replace the placeholder cache with one holding `capacity` entries.
    pub fn with_placeholder_cache(mut self, capacity: usize, clear_on_memory_pressure: bool) -> Self {
        self.placeholders = SharedLruCache::from_cache(
            LruCache::new(non_zero(capacity)).with_clear_on_memory_pressure(clear_on_memory_pressure),
        );
        self
    }

    /// Restore the cached set from storage, downloading a fresh batch when
    /// nothing usable was stored.
    ///
    /// Stored metadata is only trusted when every image file is still present
    /// locally; otherwise the store is wiped and a new batch downloaded.
    pub async fn initialize(&self) -> Result<Vec<UnsplashImage>> {
        let stored = match self.load().await {
            Ok(stored) => stored.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "Stored image metadata unreadable, starting over");
                Vec::new()
            }
        };

        if stored.is_empty() {
            info!("No images stored yet, downloading");
            return self.download_images(DEFAULT_DOWNLOAD_SIZE).await;
        }

        let mut all_present = true;
        for image in &stored {
            if !self.images.contains(image.image_cache_key()).await {
                all_present = false;
                break;
            }
        }

        if !all_present {
            info!(count = stored.len(), "Some stored images are missing on disk, redownloading");
            self.clear().await?;
            return self.download_images(DEFAULT_DOWNLOAD_SIZE).await;
        }

        debug!(count = stored.len(), "Restored images from storage");
        self.adopt(stored.clone()).await;
        Ok(stored)
    }

    /// A random image from the cached set, fetching one when the set is empty.
    pub async fn random_image(&self) -> Option<UnsplashImage> {
        {
            let cached = self.cached.read().await;
            if let Some(image) = cached.choose(&mut rand::thread_rng()) {
                return Some(image.clone());
            }
        }

        match self.api.random_image(self.size).await {
            Ok(image) => {
                self.adopt(vec![image.clone()]).await;
                Some(image)
            }
            Err(err) => {
                error!(error = %err, error_type = err.label(), "Failed to fetch random image");
                None
            }
        }
    }

    /// The cached set, or a freshly fetched batch when it is empty.
    pub async fn available_images(&self) -> Vec<UnsplashImage> {
        {
            let cached = self.cached.read().await;
            if !cached.is_empty() {
                return cached.clone();
            }
        }

        match self.api.random_images(self.size, AVAILABLE_IMAGES_BATCH).await {
            Ok(images) => {
                self.adopt(images.clone()).await;
                images
            }
            Err(err) => {
                error!(error = %err, error_type = err.label(), "Failed to fetch images");
                Vec::new()
            }
        }
    }

    /// Fetch `count` photos, download them, and keep those that arrived.
    pub async fn download_images(&self, count: usize) -> Result<Vec<UnsplashImage>> {
        let fetched = self.api.random_images(self.size, count).await?;
        let urls: Vec<String> =
            fetched.iter().map(|image| image.image_cache_key().to_string()).collect();

        let report = self.images.prefetch(&urls).await;
        if !report.is_complete() {
            warn!(failed = report.failed.len(), "Some images failed to download");
        }
        info!(completed = report.completed.len(), "Downloaded images");

        let kept: Vec<UnsplashImage> = fetched
            .into_iter()
            .filter(|image| report.succeeded(image.image_cache_key()))
            .collect();
        self.adopt(kept.clone()).await;
        Ok(kept)
    }

    /// Placeholder recorded for `image_id`, if still cached.
    pub fn placeholder(&self, image_id: &str) -> Option<BlurHashPlaceholder> {
        self.placeholders.get(&image_id.to_string())
    }

    /// Snapshot of the cached set without fetching.
    pub async fn cached_images(&self) -> Vec<UnsplashImage> {
        self.cached.read().await.clone()
    }

    /// Drop downloaded files, stored metadata, and the in-memory set.
    pub async fn clear(&self) -> Result<()> {
        self.images.clear().await?;
        self.store.remove(IMAGES_KEY).await?;
        self.cached.write().await.clear();
        self.placeholders.clear();
        Ok(())
    }

    /// Image metadata persisted by the last [`ImageLibrary::save`].
    pub async fn load(&self) -> Result<Option<Vec<UnsplashImage>>> {
        self.store.load_json(IMAGES_KEY).await
    }

    /// Persist `images` as the cached set's metadata.
    pub async fn save(&self, images: &[UnsplashImage]) -> Result<()> {
        self.store.save_json(IMAGES_KEY, &images).await
    }

    /// Forward memory pressure to the placeholder cache.
    pub fn handle_memory_pressure(&self) -> bool {
        self.placeholders.handle_memory_pressure()
    }

    /// Make `images` the cached set, record placeholders, and persist.
    async fn adopt(&self, images: Vec<UnsplashImage>) {
        for image in &images {
            if !self.placeholders.contains(&image.id) {
                self.placeholders.put(image.id.clone(), BlurHashPlaceholder::for_image(image));
            }
        }

        if let Err(err) = self.save(&images).await {
            warn!(error = %err, "Failed to persist images");
        }
        *self.cached.write().await = images;
    }
}
