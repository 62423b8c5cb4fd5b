//! Integration coverage for `Group::get` through the public API: the
//! registry, the empty-key rejection, and single-flight coalescing observed
//! from outside the crate.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ringcache::{get_group, new_group, ByteView, Config, GroupError, Loader};

struct CountingLoader {
    calls: AtomicU64,
}

#[async_trait]
impl Loader for CountingLoader {
    async fn load(&self, key: &str) -> Result<ByteView, GroupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        Ok(ByteView::from_owned(key.as_bytes().to_vec()))
    }
}

fn unique_name(prefix: &str) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    format!("{prefix}-{}", COUNTER.fetch_add(1, Ordering::SeqCst))
}

#[tokio::test]
async fn registered_group_is_reachable_by_name_from_anywhere_in_the_process() {
    let name = unique_name("registry");
    let loader = Arc::new(CountingLoader {
        calls: AtomicU64::new(0),
    });
    new_group(name.clone(), Config::default(), loader);

    let found = get_group(&name).expect("just registered");
    assert_eq!(found.name(), name);
    assert!(get_group("never-registered-anywhere").is_none());
}

#[tokio::test]
async fn empty_key_is_rejected() {
    let loader = Arc::new(CountingLoader {
        calls: AtomicU64::new(0),
    });
    let group = new_group(unique_name("empty"), Config::default(), loader);

    assert!(matches!(group.get("").await, Err(GroupError::EmptyKey)));
}

/// Concurrent misses for the same key across several tasks collapse into
/// one loader call; the cache serves everything after that.
#[tokio::test]
async fn concurrent_misses_for_one_key_coalesce_into_a_single_load() {
    let loader = Arc::new(CountingLoader {
        calls: AtomicU64::new(0),
    });
    let group = new_group(unique_name("coalesce"), Config::default(), loader.clone());

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let group = Arc::clone(&group);
        tasks.push(tokio::spawn(async move { group.get("shared-key").await }));
    }

    for task in tasks {
        let value = task.await.unwrap().unwrap();
        assert_eq!(value.as_slice(), b"shared-key");
    }
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);

    // Now cached; a further get does not touch the loader again.
    group.get("shared-key").await.unwrap();
    assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn a_byte_bounded_group_evicts_the_least_recently_used_key() {
    let loader = Arc::new(CountingLoader {
        calls: AtomicU64::new(0),
    });
    let config = Config {
        cache_bytes: 10,
        ..Config::default()
    };
    let group = new_group(unique_name("bounded"), config, loader.clone());

    group.get("k1").await.unwrap(); // 2 + 2 = 4 bytes
    group.get("k2").await.unwrap(); // cumulative 8
    group.get("k1").await.unwrap(); // refresh k1's recency, still cached
    group.get("k3").await.unwrap(); // cumulative 12 > 10, evicts k2

    let calls_before = loader.calls.load(Ordering::SeqCst);
    group.get("k1").await.unwrap(); // still cached
    group.get("k3").await.unwrap(); // still cached
    assert_eq!(loader.calls.load(Ordering::SeqCst), calls_before);

    group.get("k2").await.unwrap(); // evicted earlier, must reload
    assert_eq!(loader.calls.load(Ordering::SeqCst), calls_before + 1);
}
