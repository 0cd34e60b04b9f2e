//! Integration tests for the bounded FIFO cache.

use std::sync::Arc;

use heimdall::{CacheConfig, CacheKey, CacheKeyBuilder, CacheStore};

fn key(n: usize) -> CacheKey {
    CacheKeyBuilder::new("test").number(n as u64).finish()
}

#[test]
fn capacity_plus_one_evicts_first() {
    let capacity = 10;
    let store: CacheStore<usize> = CacheStore::new(&CacheConfig::new().max_entries(capacity));

    for n in 1..=capacity + 1 {
        store.put(key(n), n);
    }

    assert_eq!(store.len(), capacity);
    assert!(!store.contains(&key(1)));
    for n in 2..=capacity + 1 {
        assert_eq!(store.get(&key(n)), Some(n), "key #{n} should be present");
    }
}

#[test]
fn overwrite_keeps_size_and_position() {
    let store: CacheStore<&str> = CacheStore::new(&CacheConfig::new().max_entries(2));
    store.put(key(1), "a");
    store.put(key(2), "b");
    assert_eq!(store.put(key(1), "a2"), None);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get(&key(1)), Some("a2"));

    // key(1) is still the oldest insertion.
    assert_eq!(store.put(key(3), "c"), Some(key(1)));
}

#[test]
fn concurrent_writers_stay_bounded() {
    let store: Arc<CacheStore<usize>> =
        Arc::new(CacheStore::new(&CacheConfig::new().max_entries(50)));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for n in 0..100 {
                    store.put(key(t * 1000 + n), n);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 50);
}
