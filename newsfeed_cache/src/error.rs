//! Error types for the caching layer.
//!
//! None of these cross the public store API: disk failures are logged and
//! turned into misses or no-ops, and config errors surface only from
//! [`CacheConfig::from_env`](crate::config::CacheConfig::from_env).

use thiserror::Error;

/// Failures inside the disk tier.
#[derive(Error, Debug)]
pub enum DiskCacheError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Unsupported cache envelope version {found}")]
    UnsupportedVersion { found: u32 },
    #[error("Failed to persist temp file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// An environment variable was present but could not be parsed.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}
