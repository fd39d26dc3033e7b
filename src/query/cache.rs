use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;

use super::state::{ErasedData, QueryKey, QueryState};

/// Shared store of query results, keyed by [`QueryKey`].
///
/// Pollers write into it, the UI thread reads from it. Locks are never held
/// across an await point.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<QueryKey, Entry>>>,
}

#[derive(Debug)]
struct Entry {
    state: QueryState<ErasedData>,
    /// Most recent successful value, kept when a later fetch fails.
    last_good: Option<Arc<ErasedData>>,
    /// JSON form of `last_good`, for export.
    last_good_json: Option<Value>,
    updated_at: Option<Instant>,
    fetching: bool,
    consecutive_failures: u32,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            state: QueryState::Pending,
            last_good: None,
            last_good_json: None,
            updated_at: None,
            fetching: false,
            consecutive_failures: 0,
        }
    }
}

/// Bookkeeping for one query, as shown in the detail overlay and status bar.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInfo {
    pub status: &'static str,
    pub error: Option<String>,
    pub updated_at: Option<Instant>,
    pub fetching: bool,
    pub consecutive_failures: u32,
}

impl EntryInfo {
    /// Time since the last completed fetch, successful or not.
    pub fn age(&self) -> Option<Duration> {
        self.updated_at.map(|t| t.elapsed())
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty entry for `key`. Returns `false` if one already exists.
    pub fn register(&self, key: &QueryKey) -> bool {
        let mut entries = self.entries.write();
        if entries.contains_key(key) {
            return false;
        }
        entries.insert(key.clone(), Entry::default());
        true
    }

    /// Current state for `key`, `Pending` if nothing was ever registered.
    pub fn state<T: std::any::Any + Send + Sync>(&self, key: &QueryKey) -> QueryState<T> {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) => entry.state.clone().downcast(),
            None => QueryState::Pending,
        }
    }

    /// Most recent successful value, even if the latest fetch failed.
    pub fn last_good<T: std::any::Any + Send + Sync>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entries = self.entries.read();
        let data = entries.get(key)?.last_good.clone()?;
        data.downcast::<T>().ok()
    }

    pub fn info(&self, key: &QueryKey) -> Option<EntryInfo> {
        let entries = self.entries.read();
        entries.get(key).map(|e| EntryInfo {
            status: e.state.label(),
            error: e.state.error().map(str::to_string),
            updated_at: e.updated_at,
            fetching: e.fetching,
            consecutive_failures: e.consecutive_failures,
        })
    }

    /// Mark `key` as being fetched.
    ///
    /// Returns `false` when a fetch for the same key is already in flight; the
    /// caller must then skip its own request.
    pub fn begin_fetch(&self, key: &QueryKey) -> bool {
        let mut entries = self.entries.write();
        let entry = entries.entry(key.clone()).or_default();
        if entry.fetching {
            return false;
        }
        entry.fetching = true;
        true
    }

    /// Store the outcome of a fetch started with [`begin_fetch`](Self::begin_fetch).
    pub fn complete<T>(&self, key: &QueryKey, result: Result<T, String>)
    where
        T: Serialize + Send + Sync + 'static,
    {
        // Serialise before taking the lock.
        let result = result.map(|value| {
            let json = serde_json::to_value(&value).ok();
            (Arc::new(value) as Arc<ErasedData>, json)
        });

        let mut entries = self.entries.write();
        let entry = entries.entry(key.clone()).or_default();
        entry.fetching = false;
        entry.updated_at = Some(Instant::now());
        match result {
            Ok((data, json)) => {
                entry.state = QueryState::Success(Arc::clone(&data));
                entry.last_good = Some(data);
                entry.last_good_json = json;
                entry.consecutive_failures = 0;
            }
            Err(message) => {
                entry.state = QueryState::Error(message);
                entry.consecutive_failures += 1;
            }
        }
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<QueryKey> {
        let mut keys: Vec<QueryKey> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Number of entries still waiting for their first response.
    pub fn pending_count(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|e| e.state.is_pending())
            .count()
    }

    /// Every entry as a JSON object keyed by query key.
    pub fn export(&self) -> Value {
        let entries = self.entries.read();
        let mut keys: Vec<&QueryKey> = entries.keys().collect();
        keys.sort();

        let mut map = serde_json::Map::new();
        for key in keys {
            let entry = &entries[key];
            map.insert(
                key.to_string(),
                serde_json::json!({
                    "status": entry.state.label(),
                    "error": entry.state.error(),
                    "age_secs": entry.updated_at.map(|t| t.elapsed().as_secs_f64()),
                    "consecutive_failures": entry.consecutive_failures,
                    "data": entry.last_good_json,
                }),
            );
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_key_is_pending() {
        let cache = QueryCache::new();
        assert!(cache.state::<u32>(&"missing".into()).is_pending());
        assert!(cache.info(&"missing".into()).is_none());
    }

    #[test]
    fn register_is_idempotent() {
        let cache = QueryCache::new();
        let key = QueryKey::from("a");
        assert!(cache.register(&key));
        assert!(!cache.register(&key));
        assert_eq!(cache.keys(), vec![key]);
    }

    #[test]
    fn only_one_fetch_in_flight() {
        let cache = QueryCache::new();
        let key = QueryKey::from("a");
        assert!(cache.begin_fetch(&key));
        assert!(!cache.begin_fetch(&key));
        cache.complete(&key, Ok(1u32));
        assert!(cache.begin_fetch(&key));
    }

    #[test]
    fn failure_after_success_keeps_last_good() {
        let cache = QueryCache::new();
        let key = QueryKey::from("a");

        cache.begin_fetch(&key);
        cache.complete(&key, Ok(10u32));
        assert_eq!(cache.state::<u32>(&key).data(), Some(&10));

        cache.begin_fetch(&key);
        cache.complete::<u32>(&key, Err("timed out".into()));

        let state = cache.state::<u32>(&key);
        assert_eq!(state.error(), Some("timed out"));
        assert_eq!(cache.last_good::<u32>(&key).as_deref(), Some(&10));

        let info = cache.info(&key).unwrap();
        assert_eq!(info.status, "error");
        assert_eq!(info.consecutive_failures, 1);
        assert!(!info.fetching);
    }

    #[test]
    fn state_stays_success_while_refetching() {
        let cache = QueryCache::new();
        let key = QueryKey::from("a");
        cache.begin_fetch(&key);
        cache.complete(&key, Ok(1u32));
        cache.begin_fetch(&key);
        assert_eq!(cache.state::<u32>(&key).data(), Some(&1));
        assert!(cache.info(&key).unwrap().fetching);
    }

    #[test]
    fn export_includes_data_and_status() {
        let cache = QueryCache::new();
        cache.register(&"b".into());
        cache.complete(&"a".into(), Ok(vec![1u32, 2]));

        let exported = cache.export();
        assert_eq!(exported["a"]["status"], "success");
        assert_eq!(exported["a"]["data"], serde_json::json!([1, 2]));
        assert_eq!(exported["b"]["status"], "pending");
        assert!(exported["b"]["data"].is_null());
        assert_eq!(cache.pending_count(), 1);
    }
}
