use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

struct CacheEntry {
    inserted_at: Instant,
    ttl: Duration,
    payload: Value,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool {
        self.inserted_at.elapsed() < self.ttl
    }
}

/// TTL cache over raw response payloads, keyed by request path + query.
/// Entries are only ever written from completed responses, never
/// speculatively.
#[derive(Default)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().expect("cache lock");
        match entries.get(key) {
            Some(entry) if entry.is_fresh() => Some(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn put(&self, key: impl Into<String>, ttl: Duration, payload: Value) {
        let mut entries = self.entries.lock().expect("cache lock");
        entries.insert(
            key.into(),
            CacheEntry {
                inserted_at: Instant::now(),
                ttl,
                payload,
            },
        );
    }

    /// Drops every entry whose key starts with `prefix`; used to invalidate
    /// the booking listings after a create or cancel.
    pub fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.lock().expect("cache lock");
        entries.retain(|key, _| !key.starts_with(prefix));
    }

    pub fn clear(&self) {
        self.entries.lock().expect("cache lock").clear();
    }
}
