use chrono::{DateTime, Duration, Utc};

use crate::clock::{Clock, SystemClock};
use crate::error::{CacheError, CacheResult};

/// Chooses the instant an entry's retention is counted from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExpiryAnchor {
    /// Retention counts from the instant the cache was constructed. This is
    /// the default, and it means an entry inserted late in the cache's life
    /// expires early relative to its own insertion. See the note on
    /// [`AgedCache`].
    #[default]
    CacheCreation,
    /// Retention counts from the entry's own insertion instant.
    Insertion,
}

/// Configuration for [`AgedCache`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheConfig {
    anchor: ExpiryAnchor,
}

impl CacheConfig {
    /// Creates the default configuration (creation-anchored expiry).
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the expiry anchor.
    pub fn with_anchor(mut self, anchor: ExpiryAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// A stored key/value pair plus its retention window.
#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
    retention: Duration,
    anchored_at: DateTime<Utc>,
}

impl<K, V> Entry<K, V> {
    fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        // A retention reaching past the representable range never expires.
        match self.anchored_at.checked_add_signed(self.retention) {
            Some(expires_at) => expires_at < now,
            None => false,
        }
    }
}

/// An in-memory key/value cache where every entry carries its own
/// time-to-live.
///
/// Expired entries are purged lazily: [`size`](AgedCache::size) and
/// [`get`](AgedCache::get) drop them before doing their own work, while
/// [`is_empty`](AgedCache::is_empty) and [`put`](AgedCache::put) never purge.
/// Duplicate keys are rejected rather than overwritten.
///
/// # The retention clock
///
/// By default, retention is measured from the instant the *cache* was
/// constructed, not from the entry's insertion. An entry inserted 100ms into
/// the cache's life with a 150ms retention is live for only 50ms more. This
/// quirk is kept for compatibility with the behavior this crate replaces;
/// opt into the more conventional insertion-anchored expiry with
/// [`ExpiryAnchor::Insertion`]:
///
/// ```
/// use aged_cache::{AgedCache, CacheConfig, ExpiryAnchor, SystemClock};
/// use chrono::Duration;
///
/// let config = CacheConfig::new().with_anchor(ExpiryAnchor::Insertion);
/// let mut cache: AgedCache<&str, u32, _> = AgedCache::with_config(SystemClock, config);
/// cache.put("k", 1, Duration::seconds(1)).unwrap();
/// assert_eq!(cache.get(&"k"), Some(&1));
/// ```
///
/// # Concurrency
///
/// The cache is single-threaded and synchronous. Observing operations that
/// purge take `&mut self`; wrap the whole cache in a lock if it must be
/// shared.
#[derive(Debug)]
pub struct AgedCache<K, V, C = SystemClock> {
    entries: Vec<Entry<K, V>>,
    clock: C,
    created_at: DateTime<Utc>,
    anchor: ExpiryAnchor,
}

impl<K: PartialEq, V> AgedCache<K, V> {
    /// Creates an empty cache on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<K: PartialEq, V> Default for AgedCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, V, C: Clock> AgedCache<K, V, C> {
    /// Creates an empty cache reading time from `clock`.
    ///
    /// The construction instant is captured immediately and anchors every
    /// entry's expiry under the default [`ExpiryAnchor::CacheCreation`].
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(clock, CacheConfig::default())
    }

    /// Creates an empty cache with an explicit configuration.
    pub fn with_config(clock: C, config: CacheConfig) -> Self {
        let created_at = clock.now();
        Self {
            entries: Vec::new(),
            clock,
            created_at,
            anchor: config.anchor,
        }
    }

    /// The instant this cache was constructed.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Stores `value` under `key` with the given retention.
    ///
    /// Does not purge: an expired entry that no purging call has dropped yet
    /// still blocks its key.
    ///
    /// # Errors
    ///
    /// - [`CacheError::NegativeRetention`] if `retention` is negative.
    /// - [`CacheError::DuplicateKey`] if the key is already stored, returning
    ///   the rejected key. The cache is unchanged on either error.
    pub fn put(&mut self, key: K, value: V, retention: Duration) -> CacheResult<(), K> {
        if retention < Duration::zero() {
            return Err(CacheError::NegativeRetention(retention));
        }
        if self.entries.iter().any(|entry| entry.key == key) {
            return Err(CacheError::DuplicateKey(key));
        }

        let anchored_at = match self.anchor {
            ExpiryAnchor::CacheCreation => self.created_at,
            ExpiryAnchor::Insertion => self.clock.now(),
        };
        tracing::debug!(
            retention_ms = retention.num_milliseconds(),
            stored = self.entries.len() + 1,
            "entry stored"
        );
        self.entries.push(Entry {
            key,
            value,
            retention,
            anchored_at,
        });
        Ok(())
    }

    /// Whether the cache currently holds no entries at all.
    ///
    /// This is a raw count check and never purges, so it can report `false`
    /// while every remaining entry is expired but not yet dropped.
    /// [`size`](AgedCache::size) gives the accurate live count.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Purges expired entries, then returns the live count.
    pub fn size(&mut self) -> usize {
        self.purge_expired();
        self.entries.len()
    }

    /// Purges expired entries, then looks up `key`.
    ///
    /// Returns the first entry in insertion order whose key compares equal,
    /// or `None` if no live entry matches.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        self.purge_expired();
        self.entries
            .iter()
            .find(|entry| entry.key == *key)
            .map(|entry| &entry.value)
    }

    /// Drops every entry whose expiry instant is strictly before now.
    ///
    /// Order-preserving, and idempotent while the clock stands still.
    fn purge_expired(&mut self) {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::trace!(removed, remaining = self.entries.len(), "purged expired entries");
        }
    }
}
