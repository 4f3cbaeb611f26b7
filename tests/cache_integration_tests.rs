//! Integration Tests for the Cache
//!
//! Exercises the public API end to end, including the background sweeper,
//! with real (short) sleeps.

use std::collections::HashMap;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use ttl_cache::{Cache, CacheConfig, CacheError, Value};

// == Helper Functions ==

/// Polls `count()` until it reaches zero or the deadline passes.
async fn wait_for_empty<V>(cache: &Cache<V>, deadline: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if cache.count() == 0 {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    cache.count() == 0
}

// == Expiry ==

#[tokio::test]
async fn test_entry_visible_then_expires() {
    let cache: Cache = Cache::new(Duration::from_millis(50));

    cache.set("a", 1i64);
    assert!(cache.has("a"));

    tokio::time::sleep(Duration::from_millis(80)).await;
    assert!(!cache.has("a"));
    assert!(cache.get("a").is_none());

    assert!(
        wait_for_empty(&cache, Duration::from_secs(3)).await,
        "Sweeper should reclaim the expired entry"
    );
}

#[tokio::test]
async fn test_get_slides_expiration() {
    let cache: Cache = Cache::new(Duration::from_millis(200));
    cache.set("k", "v");

    for _ in 0..5 {
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.get("k").is_some(), "Repeated gets should keep the key alive");
    }

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!cache.has("k"), "Key should expire once gets stop");
}

#[tokio::test]
async fn test_has_does_not_extend_life() {
    let cache: Cache = Cache::new(Duration::from_millis(200));
    cache.set("k", "v");

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(cache.has("k"));
    tokio::time::sleep(Duration::from_millis(130)).await;

    assert!(!cache.has("k"), "has() must not refresh the TTL");
}

#[tokio::test]
async fn test_set_resets_expiration() {
    let cache: Cache = Cache::new(Duration::from_millis(200));
    cache.set("k", 1i64);

    tokio::time::sleep(Duration::from_millis(120)).await;
    cache.set("k", 2i64);
    tokio::time::sleep(Duration::from_millis(120)).await;

    let entry = cache.get("k").expect("overwrite should restart the TTL");
    assert_eq!(entry.value().as_i64(), Ok(2));
}

// == Guarded Insert ==

#[tokio::test]
async fn test_set_if_not_exist_has_single_winner() {
    const WRITERS: usize = 16;

    let cache: Arc<Cache> = Arc::new(Cache::new(Duration::from_secs(60)));
    let barrier = Arc::new(Barrier::new(WRITERS));

    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (i, cache.set_if_not_exist("contested", i as u64))
            })
        })
        .collect();

    let winners: Vec<usize> = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter_map(|(i, won)| won.then_some(i))
        .collect();

    assert_eq!(winners.len(), 1, "Exactly one writer should win");
    let stored = cache.get("contested").unwrap();
    assert_eq!(stored.value().as_u64(), Ok(winners[0] as u64));
    assert_eq!(cache.count(), 1);
}

#[tokio::test]
async fn test_concurrent_readers_and_writers() {
    let cache: Arc<Cache> = Arc::new(Cache::new(Duration::from_secs(60)));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..200 {
                    let key = format!("key-{}", i % 20);
                    match (t + i) % 4 {
                        0 => cache.set(key, i as i64),
                        1 => {
                            cache.set_if_not_exist(key, i as i64);
                        }
                        2 => {
                            let _ = cache.get(&key);
                        }
                        _ => {
                            let _ = cache.has(&key);
                        }
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.count() <= 20);
    let stats = cache.stats();
    assert_eq!(stats.total_entries, cache.count());
}

// == Sweeper ==

#[tokio::test]
async fn test_sweep_reclaims_all_entries() {
    let cache: Cache = Cache::with_cleanup_interval(
        Duration::from_millis(100),
        Duration::from_secs(1),
    );
    for i in 0..50 {
        cache.set(format!("key-{}", i), i as i64);
    }
    assert_eq!(cache.count(), 50);

    tokio::time::sleep(Duration::from_millis(150)).await;
    // Invisible immediately, reclaimed later
    assert!(!cache.has("key-0"));

    assert!(wait_for_empty(&cache, Duration::from_secs(3)).await);
    let stats = cache.stats();
    assert_eq!(stats.reclaimed, 50);
}

#[tokio::test]
async fn test_cleanup_interval_below_one_second_is_raised() {
    let cache: Cache = Cache::with_cleanup_interval(
        Duration::from_millis(20),
        Duration::from_millis(10),
    );
    cache.set("k", true);

    // A 10ms cadence would have swept many times by now
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(cache.count(), 1);

    tokio::time::sleep(Duration::from_millis(900)).await;
    assert_eq!(cache.count(), 0);
}

// == Stored Value Accessors ==

#[tokio::test]
async fn test_coercion_on_cached_values() {
    let cache: Cache = Cache::new(Duration::from_secs(60));
    cache.set("num", 42i64);
    cache.set("str", "x");

    let num = cache.get("num").unwrap();
    assert_eq!(num.value().as_f64(), Ok(42.0));

    let s = cache.get("str").unwrap();
    assert_eq!(
        s.value().as_i64(),
        Err(CacheError::TypeMismatch { expected: "i64" })
    );
    assert_eq!(s.value().must_i64(Some(7)), 7);
}

#[tokio::test]
async fn test_memoized_json_lookup() {
    let cache: Cache = Cache::from_config(&CacheConfig::new(Duration::from_secs(60)));
    let body = serde_json::json!({
        "login": "ada",
        "followers": 1815,
        "orgs": ["analytical-engines", null]
    });
    cache.set("user:ada", body);

    let entry = cache.get("user:ada").unwrap();
    let user: HashMap<String, Value> = entry.value().must_map(None);
    assert_eq!(user["login"].as_str(), Ok("ada"));
    assert_eq!(user["followers"].must_u64(None), 1815);
    assert_eq!(
        user["orgs"].as_string_array(),
        Ok(vec!["analytical-engines".to_string(), String::new()])
    );
}
