use std::sync::Arc;

use aged_cache::{AgedCache, CacheError, ManualClock};
use chrono::{Duration, Utc};

const SESSION_RETENTION_MS: i64 = 200;
const TOKEN_RETENTION_MS: i64 = 50;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A steppable clock so the demo can age entries without sleeping.
    let clock = Arc::new(ManualClock::starting_at(Utc::now()));
    let mut cache = AgedCache::with_clock(Arc::clone(&clock));

    println!("Fresh cache is empty: {}", cache.is_empty());

    cache.put(
        "session",
        "alice".to_string(),
        Duration::milliseconds(SESSION_RETENTION_MS),
    )?;
    cache.put(
        "token",
        "abc123".to_string(),
        Duration::milliseconds(TOKEN_RETENTION_MS),
    )?;
    println!("Cache size after two puts: {}", cache.size());

    println!("Looking up key \"session\"...");
    println!("Got: {:?}", cache.get(&"session"));

    println!("Inserting \"session\" again (should be rejected)...");
    match cache.put("session", "bob".to_string(), Duration::milliseconds(100)) {
        Err(CacheError::DuplicateKey(key)) => println!("Rejected duplicate key: {}", key),
        other => println!("Unexpected outcome: {:?}", other),
    }

    println!("Advancing the clock by 100ms...");
    clock.advance(Duration::milliseconds(100));
    println!("Cache size after aging: {}", cache.size());
    println!("\"token\" after aging: {:?}", cache.get(&"token"));
    println!("\"session\" after aging: {:?}", cache.get(&"session"));

    println!("Advancing the clock past every retention window...");
    clock.advance(Duration::milliseconds(200));
    println!("Cache size at the end: {}", cache.size());

    Ok(())
}
