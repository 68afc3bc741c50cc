use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// An injectable source of the current instant.
///
/// The cache reads time exclusively through this trait, so tests can age
/// entries deterministically instead of sleeping.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// The real wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Wrap it in an [`Arc`] to hold a handle while the cache holds another:
///
/// ```
/// use std::sync::Arc;
/// use aged_cache::{AgedCache, ManualClock};
/// use chrono::{Duration, Utc};
///
/// let clock = Arc::new(ManualClock::starting_at(Utc::now()));
/// let mut cache: AgedCache<&str, u32, _> = AgedCache::with_clock(Arc::clone(&clock));
///
/// cache.put("k", 1, Duration::milliseconds(100)).unwrap();
/// clock.advance(Duration::milliseconds(150));
/// assert_eq!(cache.get(&"k"), None);
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Moves the clock to an absolute instant.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock() = now;
    }

    /// Steps the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock();
        *now = *now + step;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
