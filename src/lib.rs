//! A small in-memory key/value cache with per-entry time-to-live
//!
//! This crate provides [`AgedCache`], an associative container that pairs
//! every entry with its own retention duration and drops expired entries
//! lazily during observing calls. Time is read through the injectable
//! [`Clock`] trait, so tests can age entries with [`ManualClock`] instead of
//! sleeping.
//!
//! Note the retention quirk: by default an entry's time-to-live is measured
//! from the instant the *cache* was constructed, not from the entry's
//! insertion. See [`AgedCache`] for details and [`ExpiryAnchor`] for the
//! insertion-anchored alternative.
//!
//! ```
//! use std::sync::Arc;
//! use aged_cache::{AgedCache, ManualClock};
//! use chrono::{Duration, Utc};
//!
//! let clock = Arc::new(ManualClock::starting_at(Utc::now()));
//! let mut cache = AgedCache::with_clock(Arc::clone(&clock));
//!
//! cache.put("session", "alice", Duration::milliseconds(100)).unwrap();
//! assert_eq!(cache.get(&"session"), Some(&"alice"));
//!
//! clock.advance(Duration::milliseconds(150));
//! assert_eq!(cache.get(&"session"), None);
//! assert_eq!(cache.size(), 0);
//! ```

pub mod cache;
pub mod clock;
pub mod error;

pub use cache::{AgedCache, CacheConfig, ExpiryAnchor};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CacheError, CacheResult};
