//! Process-local TTL caching.
//!
//! # Responsibilities
//! - Store provider responses keyed by normalized string keys
//! - Expire entries lazily once their age exceeds the TTL
//! - Share one cache handle across request tasks
//!
//! # Design Decisions
//! - Explicit epoch-millisecond timestamps, one fixed TTL per cache
//! - Stale entries stay in memory until overwritten (no eviction task)
//! - Concurrent misses for the same key may duplicate upstream work;
//!   writes are idempotent overwrites so the duplicate is benign

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default entry lifetime: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry<V> {
    value: V,
    stored_at_ms: i64,
}

/// A key/value store whose entries expire a fixed duration after insertion.
///
/// Cheap to clone; clones share the same underlying map.
#[derive(Clone)]
pub struct TimedCache<V> {
    inner: Arc<DashMap<String, CacheEntry<V>>>,
    ttl_ms: i64,
}

impl<V: Clone> TimedCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl_ms: ttl.as_millis() as i64,
        }
    }

    /// Return the stored value if present and younger than the TTL.
    ///
    /// Stale entries are left in place; they behave as absent and get
    /// replaced by the next `set` for the same key.
    pub fn get(&self, key: &str) -> Option<V> {
        let entry = self.inner.get(key)?;
        if now_ms() - entry.stored_at_ms < self.ttl_ms {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Insert or overwrite, resetting the entry's timestamp to now.
    pub fn set(&self, key: &str, value: V) {
        self.inner.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at_ms: now_ms(),
            },
        );
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
