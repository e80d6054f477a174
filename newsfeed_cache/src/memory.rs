//! In-memory bounded LRU cache shared across tasks and threads.

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::entry::CacheEntry;
use crate::key::CacheKey;
use crate::payload::CachedPayload;
use crate::store::CacheStore;

/// Default ceiling on the number of cached responses.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// Default ceiling on the summed [`CachedPayload::estimated_cost`] (50 MiB).
pub const DEFAULT_MAX_COST_BYTES: usize = 50 * 1024 * 1024;

/// Bounds enforced by [`MemoryCacheStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemoryLimits {
    pub max_entries: usize,
    pub max_cost_bytes: usize,
}

impl Default for MemoryLimits {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            max_cost_bytes: DEFAULT_MAX_COST_BYTES,
        }
    }
}

/// A single cached value with its estimated cost.
struct Slot {
    entry: CacheEntry<CachedPayload>,
    cost: usize,
}

struct Inner {
    lru: LruCache<CacheKey, Slot>,
    total_cost: usize,
}

impl Inner {
    fn take(&mut self, key: &CacheKey) -> Option<Slot> {
        let slot = self.lru.pop(key)?;
        self.total_cost -= slot.cost;
        Some(slot)
    }
}

/// Thread-safe in-memory cache bounded by entry count and estimated cost.
///
/// An [`LruCache`] sized to `max_entries` holds the entries and doubles as
/// the key index for [`remove_matching`](Self::remove_matching), so the set
/// of keys it sees is always exactly the set of live entries. The running
/// cost total is kept under the same lock. A write that pushes the total
/// over `max_cost_bytes` pops least recently used entries until it fits,
/// but never the entry just written, so a single oversized payload is
/// still cached on its own.
///
/// Freshness is not checked here; callers compare the returned entry's
/// timestamp against their TTL.
pub struct MemoryCacheStore {
    inner: Mutex<Inner>,
    limits: MemoryLimits,
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCacheStore {
    /// Creates a store with the default 100-entry / 50 MiB bounds.
    pub fn new() -> Self {
        Self::with_limits(MemoryLimits::default())
    }

    /// A `max_entries` of zero is treated as one.
    pub fn with_limits(limits: MemoryLimits) -> Self {
        let capacity = NonZeroUsize::new(limits.max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(Inner {
                lru: LruCache::new(capacity),
                total_cost: 0,
            }),
            limits,
        }
    }

    pub fn limits(&self) -> MemoryLimits {
        self.limits
    }

    pub fn len(&self) -> usize {
        self.inner.lock().lru.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().lru.is_empty()
    }

    /// Sum of the estimated cost of every live entry.
    pub fn total_cost(&self) -> usize {
        self.inner.lock().total_cost
    }

    /// Snapshot of the live keys, most recently used first.
    pub fn keys(&self) -> Vec<CacheKey> {
        self.inner.lock().lru.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Removes every entry whose key satisfies `predicate` and returns how
    /// many were removed. The predicate runs with the store locked and must
    /// not call back into it.
    pub fn remove_matching<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CacheKey) -> bool,
    {
        let mut inner = self.inner.lock();
        let matched: Vec<CacheKey> = inner
            .lru
            .iter()
            .map(|(k, _)| k)
            .filter(|k| predicate(k))
            .cloned()
            .collect();
        let removed = matched
            .iter()
            .filter(|key| inner.take(key).is_some())
            .count();
        tracing::debug!("Removed {} matching cache entries", removed);
        removed
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry<CachedPayload>> {
        self.inner.lock().lru.get(key).map(|slot| slot.entry.clone())
    }

    fn set(&self, entry: CacheEntry<CachedPayload>, key: &CacheKey) {
        let cost = entry.data().estimated_cost();
        let mut inner = self.inner.lock();
        inner.total_cost += cost;
        if let Some((old_key, old)) = inner.lru.push(key.clone(), Slot { entry, cost }) {
            inner.total_cost -= old.cost;
            if old_key != *key {
                tracing::debug!("Evicting cache entry {}", old_key);
            }
        }

        while inner.total_cost > self.limits.max_cost_bytes && inner.lru.len() > 1 {
            match inner.lru.pop_lru() {
                Some((victim, slot)) => {
                    inner.total_cost -= slot.cost;
                    tracing::debug!("Evicting cache entry {}", victim);
                }
                None => break,
            }
        }
    }

    fn remove(&self, key: &CacheKey) {
        self.inner.lock().take(key);
    }

    fn remove_all(&self) {
        let mut inner = self.inner.lock();
        inner.lru.clear();
        inner.total_cost = 0;
    }
}
