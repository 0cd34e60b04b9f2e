//! Bounded key → value store with FIFO eviction.
//!
//! Eviction order is kept explicitly in a queue of keys rather than relying
//! on map iteration order. Reads never reorder entries (not LRU): the entry
//! evicted next is always the oldest one inserted.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::CacheKey;

/// Configuration for a [`CacheStore`].
///
/// ```rust
/// # use heimdall::CacheConfig;
/// let config = CacheConfig::new().max_entries(500);
/// assert_eq!(config.max_entries, 500);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries. Default: 1,000. Clamped to at least 1.
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 1_000 }
    }
}

impl CacheConfig {
    /// Create a new config with the default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Smaller store for conversational traffic (200 entries).
    pub fn chat() -> Self {
        Self { max_entries: 200 }
    }

    /// Set the maximum number of entries.
    pub fn max_entries(mut self, n: usize) -> Self {
        self.max_entries = n;
        self
    }
}

struct Entries<V> {
    values: HashMap<CacheKey, V>,
    order: VecDeque<CacheKey>,
}

/// Thread-safe bounded store with FIFO eviction.
pub struct CacheStore<V> {
    entries: Mutex<Entries<V>>,
    capacity: usize,
}

impl<V: Clone> CacheStore<V> {
    /// Create an empty store.
    pub fn new(config: &CacheConfig) -> Self {
        let capacity = config.max_entries.max(1);
        Self {
            entries: Mutex::new(Entries {
                values: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
            capacity,
        }
    }

    /// Look up a value. Returns `None` on miss.
    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.lock().values.get(key).cloned()
    }

    /// Insert a value, evicting the oldest entry when full.
    ///
    /// Overwriting an existing key keeps its original eviction position.
    /// Returns the evicted key, if any.
    pub fn put(&self, key: CacheKey, value: V) -> Option<CacheKey> {
        let mut entries = self.lock();
        if let Some(slot) = entries.values.get_mut(&key) {
            *slot = value;
            return None;
        }

        let evicted = if entries.order.len() >= self.capacity {
            let oldest = entries.order.pop_front();
            if let Some(oldest) = oldest {
                entries.values.remove(&oldest);
            }
            oldest
        } else {
            None
        };

        entries.values.insert(key, value);
        entries.order.push_back(key);
        evicted
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.lock().values.contains_key(key)
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.lock().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all entries.
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.values.clear();
        entries.order.clear();
    }

    // A panic while holding the lock cannot leave the map and queue out of
    // step: every mutation completes before any call that could panic.
    fn lock(&self) -> MutexGuard<'_, Entries<V>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
