//! Composition root: turns CLI flags and environment into a wired-up service.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use newsfeed_cache::newsfeed_api::Client;
use newsfeed_cache::{CacheConfig, CachingNewsService, DiskCacheStore, MemoryCacheStore};

const ENV_API_URL: &str = "NEWSFEED_API_URL";
const ENV_API_KEY: &str = "NEWSFEED_API_KEY";

#[derive(Args)]
pub struct ConnectionArgs {
    /// Base URL of the news backend (falls back to $NEWSFEED_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// API key for the news backend (falls back to $NEWSFEED_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Answer from the disk cache (up to its TTL) when the backend fails
    #[arg(long, global = true)]
    pub offline_fallback: bool,

    /// Directory for the disk cache (falls back to $NEWSFEED_DISK_DIR)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,
}

/// Everything a fetch command needs.
pub struct App {
    pub service: CachingNewsService<Client>,
}

/// Cache settings from the environment, with CLI flags taking precedence.
pub fn load_config(conn: &ConnectionArgs) -> Result<CacheConfig> {
    let mut config = CacheConfig::from_env()?;
    if let Some(dir) = &conn.cache_dir {
        config.disk_dir = dir.clone();
    }
    if conn.offline_fallback {
        config.offline_fallback = true;
    }
    Ok(config)
}

/// Opens the disk tier on its own, for commands that never hit the network.
pub fn open_disk(conn: &ConnectionArgs) -> Result<DiskCacheStore> {
    let config = load_config(conn)?;
    Ok(DiskCacheStore::with_ttl(config.disk_dir, config.disk_ttl))
}

impl App {
    pub fn connect(conn: &ConnectionArgs) -> Result<Self> {
        let config = load_config(conn)?;

        let api_key = conn
            .api_key
            .clone()
            .or_else(|| std::env::var(ENV_API_KEY).ok())
            .context("missing API key: pass --api-key or set NEWSFEED_API_KEY")?;
        let client = match conn
            .api_url
            .clone()
            .or_else(|| std::env::var(ENV_API_URL).ok())
        {
            Some(url) => Client::with_base_url(&url, &api_key),
            None => Client::new(&api_key),
        };

        let memory = Arc::new(MemoryCacheStore::with_limits(config.memory));
        let mut service =
            CachingNewsService::new(client, memory).with_ttl_policy(config.ttl_policy);
        if config.offline_fallback {
            tracing::debug!("Offline fallback enabled at {}", config.disk_dir.display());
            let disk = DiskCacheStore::with_ttl(config.disk_dir, config.disk_ttl);
            service = service.with_offline_fallback(Arc::new(disk));
        }

        Ok(Self { service })
    }
}
