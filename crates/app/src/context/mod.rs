//! Application context - dependency injection container

use std::sync::Arc;

use byt_core::{
    FoaasApi, ImageLibrary, ImageStore, KeyValueStore, OperationCatalog, PhotoApi, VersionTracker,
};
use byt_domain::{Config, Result};
use byt_infra::{FileImageStore, FoaasClient, HttpClient, JsonFileStore, UnsplashClient};
use tracing::info;

/// Adapters the services are built from. Swapped out wholesale in tests.
pub struct Ports {
    pub foaas: Arc<dyn FoaasApi>,
    pub photos: Arc<dyn PhotoApi>,
    pub store: Arc<dyn KeyValueStore>,
    pub images: Arc<dyn ImageStore>,
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub operations: Arc<OperationCatalog>,
    pub images: Arc<ImageLibrary>,
    pub version: Arc<VersionTracker>,
}

impl AppContext {
    /// Wire the production adapters described by `config`.
    pub fn new(config: Config) -> Result<Self> {
        let http = HttpClient::from_config(&config.http)?;

        let ports = Ports {
            foaas: Arc::new(FoaasClient::new(http.clone(), config.foaas.base_url.clone())),
            photos: Arc::new(UnsplashClient::new(http.clone(), &config.unsplash)),
            store: Arc::new(JsonFileStore::new(config.storage.store_dir())),
            images: Arc::new(FileImageStore::new(config.storage.image_dir(), http)),
        };

        info!(data_dir = %config.storage.data_dir.display(), "Application context ready");
        Ok(Self::with_ports(config, ports))
    }

    /// Build the services over caller-supplied adapters.
    pub fn with_ports(config: Config, ports: Ports) -> Self {
        let cache = &config.cache;

        let operations = OperationCatalog::new(
            ports.foaas,
            Arc::clone(&ports.store),
            config.foaas.base_url.clone(),
        )
        .with_message_cache(cache.message_capacity, cache.clear_on_memory_pressure);

        let images = ImageLibrary::new(ports.photos, Arc::clone(&ports.store), ports.images)
            .with_image_size(config.images.size())
            .with_placeholder_cache(cache.placeholder_capacity, cache.clear_on_memory_pressure);

        let version = VersionTracker::new(ports.store);

        Self {
            config,
            operations: Arc::new(operations),
            images: Arc::new(images),
            version: Arc::new(version),
        }
    }

    /// Forward a host memory-pressure signal to every in-memory cache.
    pub fn handle_memory_pressure(&self) {
        let messages_cleared = self.operations.handle_memory_pressure();
        let placeholders_cleared = self.images.handle_memory_pressure();
        info!(messages_cleared, placeholders_cleared, "Handled memory pressure");
    }
}
