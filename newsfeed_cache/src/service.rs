//! The news-fetching seam and the read-through caching decorator around it.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use newsfeed_api::types::Article;

use crate::clock::{Clock, SystemClock};
use crate::disk::DiskCacheStore;
use crate::entry::CacheEntry;
use crate::key::CacheKey;
use crate::memory::MemoryCacheStore;
use crate::payload::CachedPayload;
use crate::store::CacheStore;
use crate::ttl::TtlPolicy;

/// Fetch operations for every content shape the app displays.
///
/// Each call is a single-shot request that yields one result or one error.
#[async_trait]
pub trait NewsService: Send + Sync {
    type Error: Send;

    async fn top_headlines(&self, country: &str, page: i64) -> Result<Vec<Article>, Self::Error>;

    async fn category_headlines(
        &self,
        category: &str,
        country: &str,
        page: i64,
    ) -> Result<Vec<Article>, Self::Error>;

    async fn breaking_news(&self, country: &str) -> Result<Vec<Article>, Self::Error>;

    async fn article(&self, id: &str) -> Result<Article, Self::Error>;
}

/// Wraps a live [`NewsService`] with a read-through, write-on-success cache.
///
/// A request is answered from the store when its entry is younger than the
/// [`TtlPolicy`] allows; otherwise the inner service is called and a
/// successful result is stored stamped with the clock's current time.
/// Errors from the inner service pass through untouched and are never
/// cached. Identical concurrent misses are not coalesced; the last
/// successful write wins.
///
/// With [`with_offline_fallback`](Self::with_offline_fallback), successful
/// results are also persisted to disk, and an inner failure is answered
/// from a disk entry that is still within the disk store's TTL. That disk
/// I/O runs on tokio's blocking pool. Calls on the primary store are
/// synchronous, so a disk-backed primary store blocks the calling task.
pub struct CachingNewsService<S, C = MemoryCacheStore> {
    inner: S,
    store: Arc<C>,
    ttl_policy: TtlPolicy,
    clock: Arc<dyn Clock>,
    offline: Option<Arc<DiskCacheStore>>,
}

impl<S, C> CachingNewsService<S, C>
where
    S: NewsService,
    C: CacheStore,
{
    pub fn new(inner: S, store: Arc<C>) -> Self {
        Self {
            inner,
            store,
            ttl_policy: TtlPolicy::default(),
            clock: Arc::new(SystemClock),
            offline: None,
        }
    }

    pub fn with_ttl_policy(mut self, ttl_policy: TtlPolicy) -> Self {
        self.ttl_policy = ttl_policy;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_offline_fallback(mut self, disk: Arc<DiskCacheStore>) -> Self {
        self.offline = Some(disk);
        self
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn store(&self) -> &Arc<C> {
        &self.store
    }

    pub fn ttl_policy(&self) -> &TtlPolicy {
        &self.ttl_policy
    }

    /// Drops every cached entry, e.g. on a user-initiated refresh.
    pub fn invalidate_cache(&self) {
        tracing::debug!("Invalidating news cache");
        self.store.remove_all();
    }

    async fn fetch_through<T, F, Fut>(
        &self,
        key: CacheKey,
        unpack: fn(CachedPayload) -> Option<T>,
        fetch: F,
    ) -> Result<T, S::Error>
    where
        T: Clone + Into<CachedPayload>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, S::Error>>,
    {
        if let Some(entry) = self.store.get(&key) {
            let ttl = self.ttl_policy.ttl(&key);
            if !entry.is_expired_at(ttl, self.clock.now()) {
                if let Some(value) = unpack(entry.into_data()) {
                    tracing::debug!("Cache hit for {}", key);
                    return Ok(value);
                }
            }
        }
        tracing::debug!("Cache miss for {}", key);

        match fetch().await {
            Ok(value) => {
                let entry = CacheEntry::at(value.clone().into(), self.clock.now());
                if let Some(disk) = &self.offline {
                    persist_offline(Arc::clone(disk), entry.clone(), key.clone()).await;
                }
                self.store.set(entry, &key);
                Ok(value)
            }
            Err(err) => match self.offline_hit(&key, unpack).await {
                Some(value) => Ok(value),
                None => Err(err),
            },
        }
    }

    async fn offline_hit<T>(
        &self,
        key: &CacheKey,
        unpack: fn(CachedPayload) -> Option<T>,
    ) -> Option<T> {
        let disk = Arc::clone(self.offline.as_ref()?);
        let ttl = disk.ttl();
        let lookup = key.clone();
        let entry = match tokio::task::spawn_blocking(move || disk.get(&lookup)).await {
            Ok(entry) => entry?,
            Err(e) => {
                tracing::warn!("Disk cache read for {} failed: {}", key, e);
                return None;
            }
        };
        if entry.is_expired_at(ttl, self.clock.now()) {
            tracing::debug!("Disk entry for {} is past the offline TTL", key);
            return None;
        }
        tracing::warn!(
            "Serving {} from disk cache (stored {}) after fetch failure",
            key,
            entry.timestamp()
        );
        unpack(entry.into_data())
    }
}

/// Writes `entry` to the disk tier on the blocking pool, waiting for it to
/// land before the fetch returns.
async fn persist_offline(
    disk: Arc<DiskCacheStore>,
    entry: CacheEntry<CachedPayload>,
    key: CacheKey,
) {
    if let Err(e) = tokio::task::spawn_blocking(move || disk.set(entry, &key)).await {
        tracing::warn!("Disk cache write task failed: {}", e);
    }
}

impl<S> CachingNewsService<S, MemoryCacheStore>
where
    S: NewsService,
{
    /// Drops the cached entries whose keys match `predicate`, leaving the
    /// rest in place. Returns the number of entries removed.
    pub fn invalidate_matching<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CacheKey) -> bool,
    {
        self.store.remove_matching(predicate)
    }
}

#[async_trait]
impl<S, C> NewsService for CachingNewsService<S, C>
where
    S: NewsService,
    C: CacheStore,
{
    type Error = S::Error;

    async fn top_headlines(&self, country: &str, page: i64) -> Result<Vec<Article>, Self::Error> {
        self.fetch_through(
            CacheKey::top_headlines(country, page),
            CachedPayload::into_articles,
            || self.inner.top_headlines(country, page),
        )
        .await
    }

    async fn category_headlines(
        &self,
        category: &str,
        country: &str,
        page: i64,
    ) -> Result<Vec<Article>, Self::Error> {
        self.fetch_through(
            CacheKey::category_headlines(category, country, page),
            CachedPayload::into_articles,
            || self.inner.category_headlines(category, country, page),
        )
        .await
    }

    async fn breaking_news(&self, country: &str) -> Result<Vec<Article>, Self::Error> {
        self.fetch_through(
            CacheKey::breaking_news(country),
            CachedPayload::into_articles,
            || self.inner.breaking_news(country),
        )
        .await
    }

    async fn article(&self, id: &str) -> Result<Article, Self::Error> {
        self.fetch_through(
            CacheKey::article(id),
            CachedPayload::into_article,
            || self.inner.article(id),
        )
        .await
    }
}
