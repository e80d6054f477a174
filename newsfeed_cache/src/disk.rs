//! File-per-key JSON cache used as the slow, long-lived offline tier.
//!
//! Every entry is one `<stem>.json` file in the cache directory, holding a
//! versioned envelope:
//!
//! ```json
//! { "version": 1, "key": "headlines_us_1", "timestamp": "...", "payload": { ... } }
//! ```
//!
//! The directory is treated as purgeable: files may vanish at any time and
//! a missing file is simply a miss. Nothing in this module returns an error
//! to the caller; failures are logged and degrade to "no disk cache".

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::entry::CacheEntry;
use crate::error::DiskCacheError;
use crate::key::CacheKey;
use crate::payload::CachedPayload;
use crate::store::CacheStore;

/// Default staleness bound for disk entries, independent of [`TtlPolicy`](crate::TtlPolicy).
pub const DEFAULT_DISK_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Bumped whenever the envelope or payload layout changes.
pub const ENVELOPE_VERSION: u32 = 1;

/// File used when a key's computed path fails validation.
pub const FALLBACK_FILE_NAME: &str = "invalid_key.json";

const FILE_EXTENSION: &str = "json";
const TEMP_PREFIX: &str = ".tmp-";
const MAX_STEM_LEN: usize = 200;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    key: &'a str,
    timestamp: DateTime<Utc>,
    payload: &'a CachedPayload,
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    key: String,
    timestamp: DateTime<Utc>,
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct EnvelopeHeader {
    version: u32,
    key: String,
    timestamp: DateTime<Utc>,
}

/// Summary of one file in the disk tier, as reported by [`DiskCacheStore::list`].
#[derive(Clone, Debug, PartialEq)]
pub struct DiskEntryInfo {
    /// Canonical string of the key that wrote the file.
    pub key: String,
    pub timestamp: DateTime<Utc>,
    pub version: u32,
    pub path: PathBuf,
}

/// Persistent cache store backed by one JSON file per key.
///
/// Writes go to a temp file in the same directory, are fsynced, then
/// renamed over the destination, so readers never see a partial file.
/// The store hands back entries of any age; [`ttl`](Self::ttl) is the
/// bound callers are expected to apply.
pub struct DiskCacheStore {
    dir: PathBuf,
    ttl: Duration,
}

impl DiskCacheStore {
    /// Opens a store rooted at `dir` with the default 24-hour TTL.
    /// The directory is created on first write.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self::with_ttl(dir, DEFAULT_DISK_TTL)
    }

    pub fn with_ttl(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The file backing `key`.
    ///
    /// The sanitized stem is re-checked to name a direct child of the cache
    /// directory; anything else maps to [`FALLBACK_FILE_NAME`].
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        let stem = key.file_stem();
        let file_name = format!("{}.{}", stem, FILE_EXTENSION);
        let candidate = self.dir.join(&file_name);

        let valid = !stem.is_empty()
            && stem.len() <= MAX_STEM_LEN
            && !stem.starts_with('.')
            && candidate.parent() == Some(self.dir.as_path())
            && candidate.file_name().and_then(|n| n.to_str()) == Some(file_name.as_str());
        if valid {
            candidate
        } else {
            tracing::warn!("Cache key {} failed path validation, using fallback file", key);
            self.dir.join(FALLBACK_FILE_NAME)
        }
    }

    /// Number of envelope files currently on disk.
    pub fn file_count(&self) -> usize {
        match fs::read_dir(&self.dir) {
            Ok(entries) => entries
                .filter_map(Result::ok)
                .filter(|e| is_envelope_file(&e.path()))
                .count(),
            Err(_) => 0,
        }
    }

    /// Reads the header of every readable envelope in the directory,
    /// oldest first. Unreadable files are skipped.
    pub fn list(&self) -> Vec<DiskEntryInfo> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };
        let mut infos: Vec<DiskEntryInfo> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| is_envelope_file(p))
            .filter_map(|path| {
                let bytes = fs::read(&path).ok()?;
                let header: EnvelopeHeader = serde_json::from_slice(&bytes).ok()?;
                Some(DiskEntryInfo {
                    key: header.key,
                    timestamp: header.timestamp,
                    version: header.version,
                    path,
                })
            })
            .collect();
        infos.sort_by_key(|info| info.timestamp);
        infos
    }

    fn ensure_dir(&self) -> Result<(), DiskCacheError> {
        if self.dir.is_dir() {
            return Ok(());
        }
        fs::create_dir_all(&self.dir)?;
        restrict_permissions(&self.dir)?;
        tracing::debug!("Created disk cache directory {}", self.dir.display());
        Ok(())
    }

    fn read(&self, key: &CacheKey) -> Result<Option<CacheEntry<CachedPayload>>, DiskCacheError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let envelope: Envelope = serde_json::from_slice(&bytes)?;
        if envelope.version != ENVELOPE_VERSION {
            return Err(DiskCacheError::UnsupportedVersion {
                found: envelope.version,
            });
        }
        // Sanitization is lossy, so distinct keys can share a file.
        if envelope.key != key.canonical_string() {
            tracing::debug!("Disk cache file for {} holds {}", key, envelope.key);
            return Ok(None);
        }
        let payload: CachedPayload = serde_json::from_value(envelope.payload)?;
        Ok(Some(CacheEntry::at(payload, envelope.timestamp)))
    }

    fn write(&self, entry: &CacheEntry<CachedPayload>, key: &CacheKey) -> Result<(), DiskCacheError> {
        self.ensure_dir()?;
        let canonical = key.canonical_string();
        let bytes = serde_json::to_vec(&EnvelopeRef {
            version: ENVELOPE_VERSION,
            key: &canonical,
            timestamp: entry.timestamp(),
            payload: entry.data(),
        })?;
        let staged = self.stage(&bytes)?;
        commit(staged, &self.path_for(key))
    }

    /// Writes `bytes` to a fresh, fsynced temp file inside the cache
    /// directory. Dropping the returned handle deletes the file.
    fn stage(&self, bytes: &[u8]) -> Result<NamedTempFile, DiskCacheError> {
        let mut tmp = tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(".part")
            .tempfile_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        Ok(tmp)
    }
}

/// Renames a staged temp file over `dest`. On failure the temp file is
/// deleted and `dest` is left as it was.
fn commit(staged: NamedTempFile, dest: &Path) -> Result<(), DiskCacheError> {
    staged.persist(dest)?;
    Ok(())
}

fn is_envelope_file(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(FILE_EXTENSION)
}

fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(TEMP_PREFIX))
}

#[cfg(unix)]
fn restrict_permissions(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn restrict_permissions(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

impl CacheStore for DiskCacheStore {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry<CachedPayload>> {
        match self.read(key) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Ignoring unreadable disk cache entry for {}: {}", key, e);
                None
            }
        }
    }

    fn set(&self, entry: CacheEntry<CachedPayload>, key: &CacheKey) {
        if let Err(e) = self.write(&entry, key) {
            tracing::warn!("Failed to write disk cache entry for {}: {}", key, e);
        }
    }

    fn remove(&self, key: &CacheKey) {
        let path = self.path_for(key);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }

    fn remove_all(&self) {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(_) => return,
        };
        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if is_envelope_file(&path) || is_temp_file(&path) {
                if let Err(e) = fs::remove_file(&path) {
                    tracing::warn!("Failed to remove {}: {}", path.display(), e);
                }
            }
        }
    }
}
