use std::sync::Arc;

use aged_cache::{AgedCache, CacheError, ManualClock};
use chrono::{Duration, Utc};

fn manual_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::starting_at(Utc::now()))
}

#[test]
fn test_duplicate_key_is_rejected() {
    let mut cache = AgedCache::with_clock(manual_clock());
    cache.put("k", 1, Duration::seconds(1)).unwrap();

    let err = cache.put("k", 2, Duration::seconds(5)).unwrap_err();
    assert_eq!(err, CacheError::DuplicateKey("k"));
}

#[test]
fn test_failed_duplicate_put_leaves_contents_unchanged() {
    let mut cache = AgedCache::with_clock(manual_clock());
    cache.put("k", 1, Duration::seconds(1)).unwrap();

    let _ = cache.put("k", 2, Duration::seconds(5));

    assert_eq!(cache.size(), 1);
    assert_eq!(cache.get(&"k"), Some(&1));
}

#[test]
fn test_expired_but_unpurged_entry_still_blocks_its_key() {
    let clock = manual_clock();
    let mut cache = AgedCache::with_clock(Arc::clone(&clock));
    cache.put("k", 1, Duration::milliseconds(50)).unwrap();

    // No purging call runs between the expiry and the second put, so the
    // stale entry is still stored and the key is still taken.
    clock.advance(Duration::milliseconds(100));
    let err = cache.put("k", 2, Duration::seconds(1)).unwrap_err();
    assert_eq!(err, CacheError::DuplicateKey("k"));
}

#[test]
fn test_key_is_reusable_once_the_stale_entry_is_purged() {
    let clock = manual_clock();
    let mut cache = AgedCache::with_clock(Arc::clone(&clock));
    cache.put("k", 1, Duration::milliseconds(50)).unwrap();

    clock.advance(Duration::milliseconds(100));
    assert_eq!(cache.size(), 0);

    cache.put("k", 2, Duration::milliseconds(200)).unwrap();
    assert_eq!(cache.get(&"k"), Some(&2));
}

#[test]
fn test_negative_retention_is_rejected() {
    let mut cache: AgedCache<&str, i32, _> = AgedCache::with_clock(manual_clock());

    let err = cache
        .put("k", 1, Duration::milliseconds(-1))
        .unwrap_err();
    assert_eq!(err, CacheError::NegativeRetention(Duration::milliseconds(-1)));

    // The failed put left nothing behind.
    assert!(cache.is_empty());
    assert_eq!(cache.get(&"k"), None);
}

#[test]
fn test_duplicate_error_carries_the_offending_key() {
    let mut cache = AgedCache::with_clock(manual_clock());
    cache.put(String::from("user:7"), 1, Duration::seconds(1)).unwrap();

    match cache.put(String::from("user:7"), 2, Duration::seconds(1)) {
        Err(CacheError::DuplicateKey(key)) => assert_eq!(key, "user:7"),
        other => panic!("expected DuplicateKey, got {:?}", other),
    }
}

#[test]
fn test_error_messages_are_descriptive() {
    let mut cache = AgedCache::with_clock(manual_clock());
    cache.put("k", 1, Duration::seconds(1)).unwrap();

    let duplicate = cache.put("k", 2, Duration::seconds(1)).unwrap_err();
    assert!(duplicate.to_string().contains("already exists"));
    assert!(duplicate.to_string().contains('k'));

    let negative = cache.put("j", 3, Duration::milliseconds(-10)).unwrap_err();
    assert!(negative.to_string().contains("non-negative"));
}
