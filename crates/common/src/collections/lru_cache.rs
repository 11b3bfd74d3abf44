//! Bounded recency cache.
//!
//! Entries live in a slab (`Vec` of optional slots) and are threaded into a
//! doubly linked recency list by slot index, so promotion, insertion and
//! eviction are all `O(1)` without unsafe pointer juggling. A hash index maps
//! each key to its slot.
//!
//! Recency rules:
//! - `get`, `put` and `set(k, Some(v))` make `k` the most recently used (MRU)
//!   entry.
//! - A new key arriving at capacity first drops the least recently used (LRU)
//!   entry.
//! - `set(k, None)` removes `k` and nothing else.
//!
//! `LruCache` takes `&mut self` for anything that touches recency; wrap it in
//! [`SharedLruCache`](super::SharedLruCache) to share it between threads.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::mem;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Fixed-capacity cache that evicts the least recently used entry.
///
/// The key index and the recency list always hold the same key set.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroUsize;
///
/// use byt_common::collections::LruCache;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
/// cache.set("a", Some(1));
/// cache.set("b", Some(2));
/// assert_eq!(cache.get(&"a"), Some(&1));
/// cache.set("c", Some(3)); // Evicts "b"
/// assert!(cache.get(&"b").is_none());
/// ```
pub struct LruCache<K, V>
where
    K: Eq + Hash,
{
    capacity: NonZeroUsize,
    index: HashMap<Arc<K>, usize>,
    slots: Vec<Option<Entry<K, V>>>,
    vacant: Vec<usize>,
    mru: Option<usize>,
    lru: Option<usize>,
    clears_on_memory_pressure: bool,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash,
{
    /// Empty cache holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            index: HashMap::with_capacity(capacity.get()),
            slots: Vec::with_capacity(capacity.get()),
            vacant: Vec::new(),
            mru: None,
            lru: None,
            clears_on_memory_pressure: false,
        }
    }

    /// `None` for a zero capacity.
    pub fn try_new(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(Self::new)
    }

    /// Opt in to dropping every entry from [`LruCache::handle_memory_pressure`].
    #[must_use]
    pub fn with_clear_on_memory_pressure(mut self, enabled: bool) -> Self {
        self.clears_on_memory_pressure = enabled;
        self
    }

    /// Maximum number of entries.
    #[must_use]
    pub fn cap(&self) -> usize {
        self.capacity.get()
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// `true` when no entries are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether memory pressure drops every entry.
    #[must_use]
    pub fn clears_on_memory_pressure(&self) -> bool {
        self.clears_on_memory_pressure
    }

    /// Drop every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.index.clear();
        self.slots.clear();
        self.vacant.clear();
        self.mru = None;
        self.lru = None;
    }

    /// Reacts to a host memory-pressure signal.
    ///
    /// Returns `true` when the cache was cleared.
    pub fn handle_memory_pressure(&mut self) -> bool {
        if !self.clears_on_memory_pressure {
            return false;
        }
        #[cfg(feature = "observability")]
        tracing::debug!(entries = self.len(), "clearing lru cache on memory pressure");
        self.clear();
        true
    }

    /// Assigns `value` to `key`.
    ///
    /// `Some` inserts or overwrites and promotes the key to MRU, evicting the
    /// LRU entry first when a new key arrives at capacity. `None` removes the
    /// key without touching any other entry.
    pub fn set(&mut self, key: K, value: Option<V>) {
        match value {
            Some(value) => {
                self.put(key, value);
            }
            None => {
                self.remove(&key);
            }
        }
    }

    /// Like `set(key, Some(value))`, but hands back the replaced value.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&slot) = self.index.get(&key) {
            self.touch(slot);
            return self.slots[slot].as_mut().map(|entry| mem::replace(&mut entry.value, value));
        }

        if self.len() == self.cap() {
            self.pop_lru();
        }

        let key = Arc::new(key);
        let entry = Entry { key: Arc::clone(&key), value, newer: None, older: None };
        let slot = match self.vacant.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };
        self.link_front(slot);
        self.index.insert(key, slot);
        None
    }

    /// Value for `key`, promoting it to MRU. A miss changes nothing.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.touch(slot);
        self.slots[slot].as_ref().map(|entry| &entry.value)
    }

    /// Value for `key` without promoting it.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<&V> {
        let slot = *self.index.get(key)?;
        self.slots[slot].as_ref().map(|entry| &entry.value)
    }

    /// Whether `key` is cached. Recency is unchanged.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Remove `key` and return its value. Other entries keep their order.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.index.remove(key)?;
        self.release(slot).map(|entry| entry.value)
    }

    /// Entries from MRU to LRU.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { cache: self, cursor: self.mru, remaining: self.len() }
    }

    /// Keys from MRU to LRU.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    fn touch(&mut self, slot: usize) {
        if self.mru != Some(slot) {
            self.unlink(slot);
            self.link_front(slot);
        }
    }

    fn pop_lru(&mut self) {
        if let Some(slot) = self.lru {
            if let Some(entry) = self.release(slot) {
                self.index.remove(&entry.key);
            }
        }
    }

    /// Unlink `slot` and hand it to the vacant list. The caller owns the
    /// index entry.
    fn release(&mut self, slot: usize) -> Option<Entry<K, V>> {
        self.unlink(slot);
        let entry = self.slots.get_mut(slot)?.take()?;
        self.vacant.push(slot);
        Some(entry)
    }

    fn links(&self, slot: usize) -> Option<(Option<usize>, Option<usize>)> {
        self.slots.get(slot)?.as_ref().map(|entry| (entry.newer, entry.older))
    }

    fn entry_mut(&mut self, slot: usize) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(slot)?.as_mut()
    }

    fn unlink(&mut self, slot: usize) {
        let Some((newer, older)) = self.links(slot) else {
            return;
        };

        match newer.and_then(|n| self.entry_mut(n)) {
            Some(entry) => entry.older = older,
            None => self.mru = older,
        }
        match older.and_then(|o| self.entry_mut(o)) {
            Some(entry) => entry.newer = newer,
            None => self.lru = newer,
        }
        if let Some(entry) = self.entry_mut(slot) {
            entry.newer = None;
            entry.older = None;
        }
    }

    fn link_front(&mut self, slot: usize) {
        let previous_mru = self.mru;
        if let Some(entry) = self.entry_mut(slot) {
            entry.newer = None;
            entry.older = previous_mru;
        }
        match previous_mru.and_then(|p| self.entry_mut(p)) {
            Some(entry) => entry.newer = Some(slot),
            None => self.lru = Some(slot),
        }
        self.mru = Some(slot);
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("clears_on_memory_pressure", &self.clears_on_memory_pressure)
            .finish()
    }
}

/// `Keys: [..]` in recency order, then `Capacity: n`.
impl<K, V> fmt::Display for LruCache<K, V>
where
    K: Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&K> = self.keys().collect();
        write!(f, "Keys: {keys:?}\nCapacity: {}", self.capacity)
    }
}

struct Entry<K, V> {
    key: Arc<K>,
    value: V,
    newer: Option<usize>,
    older: Option<usize>,
}

/// Borrowing iterator from MRU to LRU; see [`LruCache::iter`].
pub struct Iter<'a, K, V>
where
    K: Eq + Hash,
{
    cache: &'a LruCache<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: Eq + Hash,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cache.slots.get(self.cursor?)?.as_ref()?;
        self.cursor = entry.older;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&*entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Eq + Hash, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K: Eq + Hash, V> FusedIterator for Iter<'_, K, V> {}
