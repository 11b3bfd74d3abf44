use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use byt_core::ports::{FoaasApi, ImageStore, KeyValueStore, PhotoApi, PrefetchReport};
use byt_domain::{
    BytError, Foaas, FoaasOperation, ImageSize, Result as DomainResult, UnsplashImage,
};

use super::fixtures;

/// In-memory mock for `FoaasApi`.
///
/// Messages echo the requested path so tests can assert on what was asked
/// for. Call counters expose how often the network would have been hit.
#[derive(Default, Clone)]
pub struct MockFoaasApi {
    operations: Arc<Mutex<Option<Vec<FoaasOperation>>>>,
    operation_calls: Arc<AtomicUsize>,
    message_calls: Arc<AtomicUsize>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockFoaasApi {
    /// Serve `operations` from `GET /operations`.
    pub fn new(operations: Vec<FoaasOperation>) -> Self {
        Self { operations: Arc::new(Mutex::new(Some(operations))), ..Self::default() }
    }

    /// Every call fails with a network error.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn operation_calls(&self) -> usize {
        self.operation_calls.load(Ordering::SeqCst)
    }

    pub fn message_calls(&self) -> usize {
        self.message_calls.load(Ordering::SeqCst)
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl FoaasApi for MockFoaasApi {
    async fn operations(&self) -> DomainResult<Vec<FoaasOperation>> {
        self.operation_calls.fetch_add(1, Ordering::SeqCst);
        // Suspend like a real request so concurrent callers interleave.
        tokio::task::yield_now().await;
        self.operations
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| BytError::Network("offline".into()))
    }

    async fn message(&self, path: &str) -> DomainResult<Foaas> {
        self.message_calls.fetch_add(1, Ordering::SeqCst);
        if self.operations.lock().unwrap().is_none() {
            return Err(BytError::Network("offline".into()));
        }
        self.requested.lock().unwrap().push(path.to_string());
        Ok(Foaas { message: format!("message for {path}"), subtitle: "- test".into() })
    }
}

/// In-memory mock for `PhotoApi` handing out numbered fixture images.
#[derive(Default, Clone)]
pub struct MockPhotoApi {
    next_id: Arc<AtomicUsize>,
    offline: bool,
    requested_counts: Arc<Mutex<Vec<usize>>>,
}

impl MockPhotoApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offline() -> Self {
        Self { offline: true, ..Self::default() }
    }

    pub fn requested_counts(&self) -> Vec<usize> {
        self.requested_counts.lock().unwrap().clone()
    }

    fn next_image(&self) -> UnsplashImage {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        fixtures::image(&format!("img-{id}"))
    }
}

#[async_trait]
impl PhotoApi for MockPhotoApi {
    async fn random_image(&self, _size: ImageSize) -> DomainResult<UnsplashImage> {
        if self.offline {
            return Err(BytError::Network("offline".into()));
        }
        self.requested_counts.lock().unwrap().push(1);
        Ok(self.next_image())
    }

    async fn random_images(
        &self,
        _size: ImageSize,
        count: usize,
    ) -> DomainResult<Vec<UnsplashImage>> {
        if self.offline {
            return Err(BytError::Network("offline".into()));
        }
        self.requested_counts.lock().unwrap().push(count);
        Ok((0..count).map(|_| self.next_image()).collect())
    }
}

/// In-memory mock for `KeyValueStore`.
#[derive(Default, Clone)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, bytes: &[u8]) {
        self.entries.lock().unwrap().insert(key.to_string(), bytes.to_vec());
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn load(&self, key: &str) -> DomainResult<Option<Vec<u8>>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn save(&self, key: &str, bytes: Vec<u8>) -> DomainResult<()> {
        self.entries.lock().unwrap().insert(key.to_string(), bytes);
        Ok(())
    }

    async fn remove(&self, key: &str) -> DomainResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// In-memory mock for `ImageStore`.
///
/// Prefetch succeeds for every URL except the next `fail_next` ones.
#[derive(Default, Clone)]
pub struct MockImageStore {
    present: Arc<Mutex<HashSet<String>>>,
    failures_left: Arc<AtomicUsize>,
    clears: Arc<AtomicUsize>,
}

impl MockImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` downloads fail.
    pub fn fail_next(&self, count: usize) {
        self.failures_left.store(count, Ordering::SeqCst);
    }

    pub fn mark_present(&self, key: &str) {
        self.present.lock().unwrap().insert(key.to_string());
    }

    pub fn clears(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.present.lock().unwrap().len()
    }
}

#[async_trait]
impl ImageStore for MockImageStore {
    async fn contains(&self, key: &str) -> bool {
        self.present.lock().unwrap().contains(key)
    }

    async fn prefetch(&self, urls: &[String]) -> PrefetchReport {
        let mut report = PrefetchReport::default();
        for url in urls {
            let failed = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
                .is_ok();
            if failed {
                report.failed.push(url.clone());
            } else {
                self.present.lock().unwrap().insert(url.clone());
                report.completed.push(url.clone());
            }
        }
        report
    }

    async fn clear(&self) -> DomainResult<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.present.lock().unwrap().clear();
        Ok(())
    }
}
