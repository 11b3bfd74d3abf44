//! Thread-safe handle around [`LruCache`].
//!
//! Every operation takes one `parking_lot::Mutex`, so concurrent callers see
//! the same promotion and eviction order a single thread would produce for
//! the serialised sequence of calls.

use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use parking_lot::Mutex;

use super::LruCache;

/// Cloneable, lock-protected LRU cache.
///
/// Values are handed out by clone because a reference cannot outlive the
/// lock guard.
pub struct SharedLruCache<K, V>
where
    K: Eq + Hash,
{
    inner: Arc<Mutex<LruCache<K, V>>>,
}

impl<K, V> Clone for SharedLruCache<K, V>
where
    K: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<K, V> SharedLruCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Create a shared cache with the provided non-zero capacity.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::from_cache(LruCache::new(capacity))
    }

    /// Wrap an already configured cache.
    pub fn from_cache(cache: LruCache<K, V>) -> Self {
        Self { inner: Arc::new(Mutex::new(cache)) }
    }

    /// See [`LruCache::get`].
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    /// See [`LruCache::set`].
    pub fn set(&self, key: K, value: Option<V>) {
        self.inner.lock().set(key, value);
    }

    /// See [`LruCache::put`].
    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    /// See [`LruCache::peek`].
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner.lock().peek(key).cloned()
    }

    /// See [`LruCache::remove`].
    pub fn remove(&self, key: &K) -> Option<V> {
        self.inner.lock().remove(key)
    }

    /// See [`LruCache::contains`].
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    /// See [`LruCache::len`].
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// See [`LruCache::is_empty`].
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// See [`LruCache::cap`].
    pub fn cap(&self) -> usize {
        self.inner.lock().cap()
    }

    /// See [`LruCache::clear`].
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// See [`LruCache::handle_memory_pressure`].
    pub fn handle_memory_pressure(&self) -> bool {
        self.inner.lock().handle_memory_pressure()
    }

    /// Snapshot of the keys from MRU to LRU.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.inner.lock().keys().cloned().collect()
    }
}
