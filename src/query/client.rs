use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::cache::{EntryInfo, QueryCache};
use super::retry::RetryPolicy;
use super::state::{QueryKey, QueryState};
use crate::source::Fetch;

/// Everything needed to poll one query.
pub struct QuerySpec<T> {
    pub key: QueryKey,
    pub fetcher: Arc<dyn Fetch<Output = T>>,
    pub interval: Duration,
    pub retry: RetryPolicy,
}

impl<T> QuerySpec<T> {
    pub fn new(key: impl Into<QueryKey>, fetcher: impl Fetch<Output = T> + 'static) -> Self {
        Self {
            key: key.into(),
            fetcher: Arc::new(fetcher),
            interval: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }

    pub fn every(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

type FetchJob = Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

struct Registered {
    job: FetchJob,
    interval: Duration,
    description: String,
}

/// Owns every query's poller and the cache they write into.
///
/// Dropping the client aborts all pollers; a response that arrives after
/// that is discarded with its task.
pub struct QueryClient {
    cache: QueryCache,
    runtime: Handle,
    queries: Mutex<BTreeMap<QueryKey, Registered>>,
    pollers: Mutex<HashMap<QueryKey, JoinHandle<()>>>,
    refetch: watch::Sender<u64>,
}

impl QueryClient {
    /// Create a client whose pollers run on `runtime`.
    pub fn new(runtime: Handle) -> Self {
        let (refetch, _) = watch::channel(0);
        Self {
            cache: QueryCache::new(),
            runtime,
            queries: Mutex::new(BTreeMap::new()),
            pollers: Mutex::new(HashMap::new()),
            refetch,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Register a query without starting its poller.
    ///
    /// Registering a key twice keeps the first registration; both handles
    /// read the same cache entry.
    pub fn register<T>(&self, spec: QuerySpec<T>) -> QueryHandle<T>
    where
        T: Serialize + Send + Sync + 'static,
    {
        let handle = QueryHandle {
            key: spec.key.clone(),
            cache: self.cache.clone(),
            _response: PhantomData,
        };

        if !self.cache.register(&spec.key) {
            debug!(query = %spec.key, "query already registered, sharing entry");
            return handle;
        }

        let description = spec.fetcher.describe();
        let cache = self.cache.clone();
        let key = spec.key.clone();
        let fetcher = spec.fetcher;
        let retry = spec.retry;

        let job: FetchJob = Arc::new(move || {
            let cache = cache.clone();
            let key = key.clone();
            let fetcher = Arc::clone(&fetcher);
            Box::pin(async move { fetch_once(&cache, &key, fetcher.as_ref(), retry).await })
        });

        self.queries.lock().insert(
            spec.key,
            Registered {
                job,
                interval: spec.interval,
                description,
            },
        );
        handle
    }

    /// Register a query and start polling it.
    pub fn subscribe<T>(&self, spec: QuerySpec<T>) -> QueryHandle<T>
    where
        T: Serialize + Send + Sync + 'static,
    {
        let handle = self.register(spec);
        self.start(handle.key());
        handle
    }

    /// Start the poller for `key` unless it is already running.
    pub fn start(&self, key: &QueryKey) {
        let queries = self.queries.lock();
        let Some(registered) = queries.get(key) else {
            return;
        };

        let mut pollers = self.pollers.lock();
        if pollers.contains_key(key) {
            return;
        }

        let job = Arc::clone(&registered.job);
        let interval = registered.interval;
        let mut refetch = self.refetch.subscribe();

        let task = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    changed = refetch.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        ticker.reset();
                    }
                }
                job().await;
            }
        });
        pollers.insert(key.clone(), task);
    }

    /// Start every registered poller.
    pub fn start_all(&self) {
        let keys: Vec<QueryKey> = self.queries.lock().keys().cloned().collect();
        info!(queries = keys.len(), "starting pollers");
        for key in &keys {
            self.start(key);
        }
    }

    /// Fetch `key` once now, unless a fetch for it is already in flight.
    pub async fn fetch_now(&self, key: &QueryKey) {
        let job = self.queries.lock().get(key).map(|r| Arc::clone(&r.job));
        if let Some(job) = job {
            job().await;
        }
    }

    /// Fetch every registered query once, concurrently, and wait for all.
    pub async fn fetch_all_once(&self) {
        let jobs: Vec<FetchJob> = self
            .queries
            .lock()
            .values()
            .map(|r| Arc::clone(&r.job))
            .collect();

        let mut set = tokio::task::JoinSet::new();
        for job in jobs {
            set.spawn_on(job(), &self.runtime);
        }
        while set.join_next().await.is_some() {}
    }

    /// Ask every running poller to fetch immediately.
    pub fn refetch_all(&self) {
        info!("refetching all queries");
        self.refetch.send_modify(|generation| *generation += 1);
    }

    /// Request description for `key`, e.g. `GET http://.../cache/`.
    pub fn describe(&self, key: &QueryKey) -> Option<String> {
        self.queries.lock().get(key).map(|r| r.description.clone())
    }

    pub fn interval(&self, key: &QueryKey) -> Option<Duration> {
        self.queries.lock().get(key).map(|r| r.interval)
    }

    /// Number of running pollers.
    pub fn poller_count(&self) -> usize {
        self.pollers.lock().len()
    }

    /// Abort every poller.
    pub fn shutdown(&self) {
        let mut pollers = self.pollers.lock();
        if !pollers.is_empty() {
            info!(pollers = pollers.len(), "stopping pollers");
        }
        for (_, task) in pollers.drain() {
            task.abort();
        }
    }
}

impl Drop for QueryClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn fetch_once<T>(
    cache: &QueryCache,
    key: &QueryKey,
    fetcher: &dyn Fetch<Output = T>,
    retry: RetryPolicy,
) where
    T: Serialize + Send + Sync + 'static,
{
    if !cache.begin_fetch(key) {
        debug!(query = %key, "fetch already in flight, skipping");
        return;
    }

    debug!(query = %key, "fetching");
    match retry.run(|| fetcher.fetch()).await {
        Ok(value) => cache.complete(key, Ok(value)),
        Err(err) => {
            warn!(query = %key, error = %err, "fetch failed");
            cache.complete::<T>(key, Err(err.to_string()));
        }
    }
}

/// Typed read access to one query's cache entry.
pub struct QueryHandle<T> {
    key: QueryKey,
    cache: QueryCache,
    _response: PhantomData<fn() -> T>,
}

impl<T> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            cache: self.cache.clone(),
            _response: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for QueryHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("QueryHandle").field(&self.key).finish()
    }
}

impl<T: Send + Sync + 'static> QueryHandle<T> {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    pub fn state(&self) -> QueryState<T> {
        self.cache.state(&self.key)
    }

    pub fn last_good(&self) -> Option<Arc<T>> {
        self.cache.last_good(&self.key)
    }

    pub fn info(&self) -> Option<EntryInfo> {
        self.cache.info(&self.key)
    }
}
