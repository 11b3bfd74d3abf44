//! Operation catalog service - core business logic

use std::sync::Arc;

use byt_common::collections::{LruCache, SharedLruCache};
use byt_domain::constants::{
    DEFAULT_MESSAGE_CACHE_CAPACITY, FOAAS_MESSAGE_OF_THE_DAY_PATH, OPERATIONS_KEY,
};
use byt_domain::{BytError, Foaas, FoaasOperation, Result};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::editing::FoaasPathBuilder;
use crate::non_zero;
use crate::ports::{FoaasApi, KeyValueStore, StoreExt};

/// Caches the FOAAS operation list and renders messages from it.
///
/// The list is resolved memory first, then local storage, then the remote
/// API. Rendered messages are memoised per URL.
pub struct OperationCatalog {
    api: Arc<dyn FoaasApi>,
    store: Arc<dyn KeyValueStore>,
    base_url: String,
    operations: Mutex<Vec<FoaasOperation>>,
    messages: SharedLruCache<String, Foaas>,
}

impl OperationCatalog {
    /// Create a new catalog; `base_url` seeds every path builder it hands out.
    pub fn new(
        api: Arc<dyn FoaasApi>,
        store: Arc<dyn KeyValueStore>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api,
            store,
            base_url: base_url.into(),
            operations: Mutex::new(Vec::new()),
            messages: SharedLruCache::new(non_zero(DEFAULT_MESSAGE_CACHE_CAPACITY)),
        }
    }

    /// Replace the message cache with one holding `capacity` entries.
    pub fn with_message_cache(mut self, capacity: usize, clear_on_memory_pressure: bool) -> Self {
        self.messages = SharedLruCache::from_cache(
            LruCache::new(non_zero(capacity)).with_clear_on_memory_pressure(clear_on_memory_pressure),
        );
        self
    }

    /// Operation list, loading or fetching it on first use.
    ///
    /// The list lock is held across the load-or-fetch step, so concurrent
    /// first callers share one store read and at most one API call. A failed
    /// fetch is logged and yields an empty list so callers can retry later.
    pub async fn operations(&self) -> Vec<FoaasOperation> {
        let mut cached = self.operations.lock().await;
        if !cached.is_empty() {
            return cached.clone();
        }

        match self.load().await {
            Ok(Some(stored)) if !stored.is_empty() => {
                debug!(count = stored.len(), "Loaded operations from storage");
                *cached = stored;
                return cached.clone();
            }
            Ok(_) => {}
            Err(err) => warn!(error = %err, "Failed to read stored operations"),
        }

        match self.fetch().await {
            Ok(ops) => {
                *cached = ops;
                cached.clone()
            }
            Err(err) => {
                error!(error = %err, error_type = err.label(), "Failed to fetch operations");
                Vec::new()
            }
        }
    }

    /// Fetch from the API, sort by name and persist.
    async fn fetch(&self) -> Result<Vec<FoaasOperation>> {
        let mut ops = self.api.operations().await?;
        ops.sort_by(|a, b| a.name.cmp(&b.name));
        info!(count = ops.len(), "Fetched operations");

        if let Err(err) = self.save(&ops).await {
            warn!(error = %err, "Failed to persist operations");
        }
        Ok(ops)
    }

    /// Persist `ops` under the operations key.
    pub async fn save(&self, ops: &[FoaasOperation]) -> Result<()> {
        self.store.save_json(OPERATIONS_KEY, &ops).await
    }

    /// Operations previously persisted, if any.
    pub async fn load(&self) -> Result<Option<Vec<FoaasOperation>>> {
        self.store.load_json(OPERATIONS_KEY).await
    }

    /// Forget the persisted and in-memory operation list.
    pub async fn delete_stored(&self) -> Result<()> {
        self.store.remove(OPERATIONS_KEY).await?;
        self.operations.lock().await.clear();
        Ok(())
    }

    /// Path builder for the operation called `name` (full or short name).
    pub async fn builder_for(&self, name: &str) -> Result<FoaasPathBuilder> {
        self.operations()
            .await
            .iter()
            .find(|op| op.matches(name))
            .map(|op| FoaasPathBuilder::for_operation(self.base_url.clone(), op))
            .ok_or_else(|| BytError::NotFound(format!("operation '{name}'")))
    }

    /// Render the message described by `builder`.
    pub async fn message(&self, builder: &FoaasPathBuilder) -> Result<Foaas> {
        if !builder.is_valid() {
            let missing: Vec<&str> = builder
                .tokens()
                .iter()
                .map(String::as_str)
                .filter(|token| builder.value(token).map_or(true, str::is_empty))
                .collect();
            return Err(BytError::InvalidInput(format!("missing values for {}", missing.join(", "))));
        }

        let url = builder.build();
        if let Some(hit) = self.messages.get(&url) {
            debug!(%url, "Message cache hit");
            return Ok(hit);
        }

        let message = self.api.message(&builder.path()).await?;
        self.messages.put(url, message.clone());
        Ok(message)
    }

    /// Message of the day.
    pub async fn message_of_the_day(&self) -> Result<Foaas> {
        self.api.message(FOAAS_MESSAGE_OF_THE_DAY_PATH).await
    }

    /// Drop memoised messages when the host reports memory pressure.
    pub fn handle_memory_pressure(&self) -> bool {
        self.messages.handle_memory_pressure()
    }

    pub fn cached_messages(&self) -> usize {
        self.messages.len()
    }
}
