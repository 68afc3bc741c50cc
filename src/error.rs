use chrono::Duration;
use thiserror::Error;

/// Result alias for fallible cache operations.
pub type CacheResult<T, K> = std::result::Result<T, CacheError<K>>;

/// Errors surfaced by [`AgedCache::put`](crate::AgedCache::put).
///
/// Nothing here is transient; the caller has to change its input rather than
/// retry. Absence of a key on lookup is a normal outcome, not an error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError<K> {
    /// An entry with this key is already stored. The cache does not
    /// overwrite; pick a different key or keep the existing entry. Carries
    /// the rejected key.
    #[error("key already exists: {0:?}")]
    DuplicateKey(K),

    /// The retention duration was negative. Carries the rejected duration.
    #[error("retention must be non-negative, got {0}")]
    NegativeRetention(Duration),
}
