//! Timestamped cache values.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A cached value paired with the instant it was produced.
///
/// Entries are never mutated. Refreshing a key means storing a new entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    data: T,
    timestamp: DateTime<Utc>,
}

impl<T> CacheEntry<T> {
    /// Wraps `data`, stamped with the current wall-clock time.
    pub fn new(data: T) -> Self {
        Self::at(data, Utc::now())
    }

    /// Wraps `data` with an explicit creation instant.
    pub fn at(data: T, timestamp: DateTime<Utc>) -> Self {
        Self { data, timestamp }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_data(self) -> T {
        self.data
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Age of the entry at `now`. Timestamps in the future count as age zero.
    pub fn age_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.timestamp).to_std().unwrap_or(Duration::ZERO)
    }

    /// True once the entry is at least `ttl` old.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(ttl, Utc::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a supplied instant.
    /// The boundary is inclusive: an entry exactly `ttl` old is expired.
    pub fn is_expired_at(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.age_at(now) >= ttl
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CacheEntry<U> {
        CacheEntry {
            data: f(self.data),
            timestamp: self.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_718_440_000, 0).unwrap()
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let entry = CacheEntry::at("payload", t0());
        let ttl = Duration::from_secs(300);
        let eps = ChronoDuration::milliseconds(1);
        let deadline = t0() + ChronoDuration::seconds(300);

        assert!(!entry.is_expired_at(ttl, deadline - eps));
        assert!(entry.is_expired_at(ttl, deadline));
        assert!(entry.is_expired_at(ttl, deadline + eps));
    }

    #[test]
    fn future_timestamp_is_fresh() {
        let entry = CacheEntry::at(1, t0() + ChronoDuration::seconds(60));
        assert_eq!(entry.age_at(t0()), Duration::ZERO);
        assert!(!entry.is_expired_at(Duration::from_secs(1), t0()));
    }

    #[test]
    fn zero_ttl_is_always_expired() {
        let entry = CacheEntry::at(1, t0());
        assert!(entry.is_expired_at(Duration::ZERO, t0()));
    }

    #[test]
    fn new_stamps_now() {
        let before = Utc::now();
        let entry = CacheEntry::new(vec![1, 2, 3]);
        assert!(entry.timestamp() >= before);
        assert!(!entry.is_expired(Duration::from_secs(60)));
    }

    #[test]
    fn map_keeps_timestamp() {
        let entry = CacheEntry::at(2, t0()).map(|n| n * 10);
        assert_eq!(*entry.data(), 20);
        assert_eq!(entry.timestamp(), t0());
    }
}
