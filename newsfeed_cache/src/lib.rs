//! Tiered caching for news fetches: a bounded in-memory tier with per-key
//! TTLs, a file-per-key disk tier for offline use, and a decorator that
//! puts them in front of a live [`NewsService`].
//!
//! Wraps the `newsfeed_api` HTTP client, which implements [`NewsService`].

pub mod clock;
pub mod config;
pub mod disk;
pub mod entry;
pub mod error;
pub mod key;
mod live;
pub mod memory;
pub mod payload;
pub mod pressure;
pub mod service;
pub mod store;
pub mod ttl;

pub use newsfeed_api;
pub use newsfeed_api::types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use disk::{DiskCacheStore, DiskEntryInfo};
pub use entry::CacheEntry;
pub use error::{ConfigError, DiskCacheError};
pub use key::{CacheKey, CacheKeyKind};
pub use memory::{MemoryCacheStore, MemoryLimits};
pub use payload::CachedPayload;
pub use pressure::{spawn_pressure_listener, MemoryPressure};
pub use service::{CachingNewsService, NewsService};
pub use store::CacheStore;
pub use ttl::TtlPolicy;
