//! Environment-driven configuration for the cache tiers.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::disk::DEFAULT_DISK_TTL;
use crate::error::ConfigError;
use crate::memory::MemoryLimits;
use crate::ttl::TtlPolicy;

pub const ENV_MEMORY_MAX_ENTRIES: &str = "NEWSFEED_MEMORY_MAX_ENTRIES";
pub const ENV_MEMORY_MAX_COST_BYTES: &str = "NEWSFEED_MEMORY_MAX_COST_BYTES";
pub const ENV_DISK_DIR: &str = "NEWSFEED_DISK_DIR";
pub const ENV_DISK_TTL_SECS: &str = "NEWSFEED_DISK_TTL_SECS";
pub const ENV_OFFLINE_FALLBACK: &str = "NEWSFEED_OFFLINE_FALLBACK";
pub const ENV_TTL_BREAKING_SECS: &str = "NEWSFEED_TTL_BREAKING_SECS";
pub const ENV_TTL_HEADLINES_FIRST_PAGE_SECS: &str = "NEWSFEED_TTL_HEADLINES_FIRST_PAGE_SECS";
pub const ENV_TTL_HEADLINES_LATER_PAGES_SECS: &str = "NEWSFEED_TTL_HEADLINES_LATER_PAGES_SECS";
pub const ENV_TTL_CATEGORY_SECS: &str = "NEWSFEED_TTL_CATEGORY_SECS";
pub const ENV_TTL_ARTICLE_SECS: &str = "NEWSFEED_TTL_ARTICLE_SECS";

/// Settings for both cache tiers and the freshness policy.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheConfig {
    pub memory: MemoryLimits,
    pub disk_dir: PathBuf,
    pub disk_ttl: Duration,
    pub offline_fallback: bool,
    pub ttl_policy: TtlPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            memory: MemoryLimits::default(),
            disk_dir: default_disk_dir(),
            disk_ttl: DEFAULT_DISK_TTL,
            offline_fallback: false,
            ttl_policy: TtlPolicy::default(),
        }
    }
}

/// `<system temp dir>/newsfeed-cache`, a location the OS may purge.
pub fn default_disk_dir() -> PathBuf {
    std::env::temp_dir().join("newsfeed-cache")
}

impl CacheConfig {
    /// Reads overrides from the process environment. Unset variables keep
    /// their defaults; set but unparsable ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let ttl = defaults.ttl_policy;

        let max_entries = parse_or(&lookup, ENV_MEMORY_MAX_ENTRIES, defaults.memory.max_entries)?;
        if max_entries == 0 {
            return Err(ConfigError {
                key: ENV_MEMORY_MAX_ENTRIES.to_string(),
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let memory = MemoryLimits {
            max_entries,
            max_cost_bytes: parse_or(
                &lookup,
                ENV_MEMORY_MAX_COST_BYTES,
                defaults.memory.max_cost_bytes,
            )?,
        };

        let disk_dir = lookup(ENV_DISK_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.disk_dir);

        let ttl_policy = TtlPolicy {
            breaking_news: secs_or(&lookup, ENV_TTL_BREAKING_SECS, ttl.breaking_news)?,
            headlines_first_page: secs_or(
                &lookup,
                ENV_TTL_HEADLINES_FIRST_PAGE_SECS,
                ttl.headlines_first_page,
            )?,
            headlines_later_pages: secs_or(
                &lookup,
                ENV_TTL_HEADLINES_LATER_PAGES_SECS,
                ttl.headlines_later_pages,
            )?,
            category_headlines: secs_or(&lookup, ENV_TTL_CATEGORY_SECS, ttl.category_headlines)?,
            article: secs_or(&lookup, ENV_TTL_ARTICLE_SECS, ttl.article)?,
        };

        Ok(Self {
            memory,
            disk_dir,
            disk_ttl: secs_or(&lookup, ENV_DISK_TTL_SECS, defaults.disk_ttl)?,
            offline_fallback: bool_or(&lookup, ENV_OFFLINE_FALLBACK, defaults.offline_fallback)?,
            ttl_policy,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn secs_or<F>(lookup: &F, key: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    parse_or(lookup, key, default.as_secs()).map(Duration::from_secs)
}

fn bool_or<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError {
                key: key.to_string(),
                value: raw.clone(),
                reason: "expected a boolean".to_string(),
            }),
        },
    }
}
