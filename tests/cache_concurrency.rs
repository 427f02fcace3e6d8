//! Concurrency Tests for the Response Cache
//!
//! Hammers one cache from several threads while its reaper sweeps.

use std::time::{Duration, Instant};

use pokedex::Cache;

const WRITERS: usize = 8;
const KEYS: u64 = 4;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_cache_is_send_and_sync() {
    assert_send_sync::<Cache>();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_add_and_get() {
    // Short interval so sweeps interleave with the workers
    let cache = Cache::new(Duration::from_millis(20)).unwrap();
    let deadline = Instant::now() + Duration::from_millis(300);

    let workers: Vec<_> = (0..WRITERS)
        .map(|writer| {
            let cache = cache.clone();
            tokio::task::spawn_blocking(move || {
                let mut seq = 0u64;
                let mut hits = 0u64;
                while Instant::now() < deadline {
                    let key = format!("key-{}", seq % KEYS);
                    cache.add(key.clone(), format!("{}|{}|{}", key, writer, seq));

                    let probe = format!("key-{}", (seq + 1) % KEYS);
                    if let Some(value) = cache.get(&probe) {
                        hits += 1;
                        let text = std::str::from_utf8(&value).expect("payload is utf-8");
                        let parts: Vec<&str> = text.split('|').collect();
                        assert_eq!(parts.len(), 3, "torn payload: {:?}", text);
                        assert_eq!(parts[0], probe, "value stored under another key");
                        let origin: usize = parts[1].parse().unwrap();
                        assert!(origin < WRITERS);
                        parts[2].parse::<u64>().expect("sequence number");
                    }
                    seq += 1;
                }
                hits
            })
        })
        .collect();

    let mut total_hits = 0;
    for worker in workers {
        total_hits += worker.await.expect("worker panicked");
    }

    assert!(total_hits > 0, "workers never observed each other's writes");
    assert!(cache.len() <= KEYS as usize);

    cache.shutdown().await;
}

#[tokio::test]
async fn test_last_add_wins_across_clones() {
    let cache = Cache::new(Duration::from_secs(5)).unwrap();
    let writer = cache.clone();

    let handle = tokio::task::spawn_blocking(move || {
        for i in 0..100 {
            writer.add("https://pokeapi.co/api/v2/pokemon/eevee", format!("v{}", i));
        }
    });
    handle.await.unwrap();

    let value = cache.get("https://pokeapi.co/api/v2/pokemon/eevee").unwrap();
    assert_eq!(&value[..], b"v99");
    assert_eq!(cache.len(), 1);
}
