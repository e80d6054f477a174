//! The storage seam shared by the memory and disk tiers.

use crate::entry::CacheEntry;
use crate::key::CacheKey;
use crate::payload::CachedPayload;

/// A key/entry table the caching service can read through and write to.
///
/// Implementations never fail: anything that goes wrong is reported as a
/// miss on `get` and as a no-op on the mutating calls.
pub trait CacheStore: Send + Sync {
    /// Returns the stored entry for `key`, whatever its age.
    fn get(&self, key: &CacheKey) -> Option<CacheEntry<CachedPayload>>;

    /// Inserts or replaces the entry for `key`.
    fn set(&self, entry: CacheEntry<CachedPayload>, key: &CacheKey);

    fn remove(&self, key: &CacheKey);

    fn remove_all(&self);
}
