//! The query cache.
//!
//! One [`QueryCache`] is shared by every page. It stores the last result of
//! each distinct [`QueryKey`], shares in-flight requests between concurrent
//! readers, and refetches subscribed entries when a write invalidates them.
//!
//! Entries hold JSON values; typed access decodes on the way out. Locks are
//! never held across an `.await`.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use aula_config::QueryConfig;
use aula_core::ClientError;
use aula_observability::{track_cache_hit, track_cache_invalidation, track_cache_miss};
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::QueryKey;
use crate::handle::{QueryHandle, QueryOptions};

pub type QueryResult = Result<Value, ClientError>;
type SharedQuery = Shared<BoxFuture<'static, QueryResult>>;

/// A type-erased fetcher. It receives the key it is fetching for and reads
/// its params from it.
#[derive(Clone)]
pub struct QueryFn(Arc<dyn Fn(QueryKey) -> BoxFuture<'static, QueryResult> + Send + Sync>);

impl QueryFn {
    pub fn new<F, Fut, T>(fetch: F) -> Self
    where
        F: Fn(QueryKey) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
        T: Serialize,
    {
        Self(Arc::new(move |key| {
            let fut = fetch(key);
            async move {
                let value = fut.await?;
                serde_json::to_value(value).map_err(ClientError::decode)
            }
            .boxed()
        }))
    }

    fn call(&self, key: QueryKey) -> BoxFuture<'static, QueryResult> {
        (self.0)(key)
    }
}

impl std::fmt::Debug for QueryFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("QueryFn")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryStatus {
    /// Never fetched (or disabled).
    #[default]
    Idle,
    /// First fetch in progress, no data yet.
    Loading,
    Success,
    /// The last fetch failed. Earlier data, if any, is still served.
    Error,
}

/// Snapshot of one entry, decoded for the reader.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub status: QueryStatus,
    pub error: Option<ClientError>,
    pub is_fetching: bool,
    pub last_fetched_at: Option<Instant>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: QueryStatus::Idle,
            error: None,
            is_fetching: false,
            last_fetched_at: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == QueryStatus::Loading
    }

    pub fn is_success(&self) -> bool {
        self.status == QueryStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == QueryStatus::Error
    }
}

struct InFlight {
    seq: u64,
    future: SharedQuery,
}

struct Entry {
    data: Option<Value>,
    error: Option<ClientError>,
    status: QueryStatus,
    last_fetched_at: Option<Instant>,
    last_used_at: Instant,
    invalidated: bool,
    subscribers: usize,
    seq: u64,
    in_flight: Option<InFlight>,
    fetcher: Option<QueryFn>,
    revision: watch::Sender<u64>,
}

impl Entry {
    fn new() -> Self {
        Self {
            data: None,
            error: None,
            status: QueryStatus::Idle,
            last_fetched_at: None,
            last_used_at: Instant::now(),
            invalidated: false,
            subscribers: 0,
            seq: 0,
            in_flight: None,
            fetcher: None,
            revision: watch::channel(0).0,
        }
    }

    /// Forgets the result but keeps the subscription bookkeeping, so
    /// mounted handles stay registered.
    fn reset(&mut self, seq: u64) {
        self.data = None;
        self.error = None;
        self.status = QueryStatus::Idle;
        self.last_fetched_at = None;
        self.invalidated = false;
        self.in_flight = None;
        self.seq = seq;
        self.notify();
    }

    fn is_fresh(&self, stale_time: Duration) -> bool {
        self.data.is_some()
            && !self.invalidated
            && self
                .last_fetched_at
                .is_some_and(|at| at.elapsed() < stale_time)
    }

    /// Wakes every handle watching this entry.
    fn notify(&self) {
        self.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }

    fn snapshot<T: DeserializeOwned>(&self) -> QueryState<T> {
        let mut state = QueryState {
            data: None,
            status: self.status,
            error: self.error.clone(),
            is_fetching: self.in_flight.is_some(),
            last_fetched_at: self.last_fetched_at,
        };
        if let Some(value) = &self.data {
            match serde_json::from_value(value.clone()) {
                Ok(data) => state.data = Some(data),
                Err(e) => {
                    state.status = QueryStatus::Error;
                    state.error = Some(ClientError::decode(e));
                }
            }
        }
        state
    }
}

struct CacheInner {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    config: QueryConfig,
    /// Request sequence shared by every key. Entries are dropped and
    /// recreated, so a per-entry counter could repeat.
    next_seq: AtomicU64,
}

/// Shared query cache. Cloning is cheap and every clone sees the same entries.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.len())
            .field("stale_time", &self.inner.config.stale_time)
            .field("gc_time", &self.inner.config.gc_time)
            .finish()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(QueryConfig::default())
    }
}

impl QueryCache {
    pub fn new(config: QueryConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: Mutex::new(HashMap::new()),
                config,
                next_seq: AtomicU64::new(1),
            }),
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.inner.config
    }

    /// Subscribes to `key`; see [`QueryHandle`].
    pub fn subscribe<T: DeserializeOwned>(
        &self,
        key: QueryKey,
        fetcher: QueryFn,
        options: QueryOptions,
    ) -> QueryHandle<T> {
        // page mounts are the only regular event, so sweep here
        self.collect_garbage();
        QueryHandle::new(self.clone(), key, fetcher, options)
    }

    /// Returns cached data if fresh, otherwise fetches (joining any request
    /// already in flight for the key).
    #[instrument(skip(self, key, fetcher), fields(cache.key = %key))]
    pub async fn fetch_query<T: DeserializeOwned>(
        &self,
        key: QueryKey,
        fetcher: QueryFn,
    ) -> Result<T, ClientError> {
        let cached = {
            let mut entries = self.lock();
            entries.get_mut(&key).and_then(|entry| {
                entry.last_used_at = Instant::now();
                entry
                    .is_fresh(self.inner.config.stale_time)
                    .then(|| entry.data.clone())
                    .flatten()
            })
        };

        if let Some(value) = cached {
            debug!("Cache hit");
            track_cache_hit(key.root());
            return decode(value);
        }

        debug!("Cache miss");
        track_cache_miss(key.root());
        let value = self.start_fetch(&key, &fetcher, false).await?;
        decode(value)
    }

    /// Cached data for `key`, fresh or not.
    pub fn get_query_data<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let value = self.lock().get(key).and_then(|e| e.data.clone())?;
        serde_json::from_value(value).ok()
    }

    /// Writes `data` into the entry as a successful result. A request
    /// already in flight for the key no longer settles it.
    pub fn set_query_data<T: Serialize>(&self, key: QueryKey, data: &T) -> Result<(), ClientError> {
        let value = serde_json::to_value(data).map_err(ClientError::decode)?;
        let seq = self.next_seq();
        let mut entries = self.lock();
        let entry = entries.entry(key).or_insert_with(Entry::new);
        entry.seq = seq;
        entry.in_flight = None;
        entry.data = Some(value);
        entry.error = None;
        entry.status = QueryStatus::Success;
        entry.invalidated = false;
        entry.last_fetched_at = Some(Instant::now());
        entry.notify();
        Ok(())
    }

    pub fn state<T: DeserializeOwned>(&self, key: &QueryKey) -> QueryState<T> {
        self.lock()
            .get(key)
            .map(Entry::snapshot)
            .unwrap_or_default()
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        self.lock().get(key).is_some_and(|e| e.in_flight.is_some())
    }

    /// True when the next read of `key` would go to the server.
    pub fn is_stale(&self, key: &QueryKey) -> bool {
        let stale_time = self.inner.config.stale_time;
        self.lock().get(key).is_none_or(|e| !e.is_fresh(stale_time))
    }

    /// Marks every entry under `prefix` stale. Entries someone is watching
    /// refetch once, immediately; the rest refetch on their next use.
    ///
    /// Returns the number of entries marked.
    #[instrument(skip(self, prefix), fields(cache.prefix = %prefix))]
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut marked = 0;
        let mut refetch = Vec::new();
        {
            let mut entries = self.lock();
            for (key, entry) in entries.iter_mut().filter(|(k, _)| k.starts_with(prefix)) {
                entry.invalidated = true;
                marked += 1;
                if entry.subscribers > 0 {
                    if let Some(fetcher) = &entry.fetcher {
                        refetch.push((key.clone(), fetcher.clone()));
                    }
                }
            }
        }

        debug!(marked, refetching = refetch.len(), "Cache invalidated");
        track_cache_invalidation(prefix.root(), marked);

        // A request already in flight may have read pre-write data, so force
        // a new one.
        for (key, fetcher) in refetch {
            drop(self.start_fetch(&key, &fetcher, true));
        }
        marked
    }

    /// Drops the data of every entry under `prefix`. Entries nobody is
    /// subscribed to are removed; subscribed ones stay registered as idle
    /// and refetch on their next refresh. Responses to requests started
    /// before the call are discarded.
    ///
    /// Returns the number of entries affected.
    pub fn remove(&self, prefix: &QueryKey) -> usize {
        let mut affected = 0;
        let mut entries = self.lock();
        entries.retain(|key, entry| {
            if !key.starts_with(prefix) {
                return true;
            }
            affected += 1;
            if entry.subscribers == 0 {
                return false;
            }
            entry.reset(self.next_seq());
            true
        });
        affected
    }

    /// Drops every result. Used on login and logout so no data outlives
    /// the session.
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.retain(|_, entry| entry.subscribers > 0);
        for entry in entries.values_mut() {
            entry.reset(self.next_seq());
        }
    }

    /// Evicts entries nobody is subscribed to that have not been used for
    /// longer than `gc_time`.
    pub fn collect_garbage(&self) -> usize {
        let gc_time = self.inner.config.gc_time;
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| {
            e.subscribers > 0 || e.in_flight.is_some() || e.last_used_at.elapsed() < gc_time
        });
        let evicted = before - entries.len();
        if evicted > 0 {
            debug!(evicted, "Query cache garbage collected");
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Starts a fetch for `key`, or joins the one in flight unless `force`.
    ///
    /// The request runs on its own task and settles into the entry even if
    /// every caller drops the returned future.
    pub(crate) fn start_fetch(&self, key: &QueryKey, fetcher: &QueryFn, force: bool) -> SharedQuery {
        let (future, seq) = {
            let mut entries = self.lock();
            let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
            entry.fetcher = Some(fetcher.clone());
            entry.last_used_at = Instant::now();

            if !force {
                if let Some(in_flight) = &entry.in_flight {
                    debug!(cache.key = %key, "Joining in-flight request");
                    return in_flight.future.clone();
                }
            }

            let seq = self.next_seq();
            entry.seq = seq;

            // The fetcher is invoked on first poll, outside the lock.
            let fetcher = fetcher.clone();
            let fetch_key = key.clone();
            let future = async move { fetcher.call(fetch_key).await }.boxed().shared();

            entry.in_flight = Some(InFlight {
                seq,
                future: future.clone(),
            });
            if entry.data.is_none() {
                entry.status = QueryStatus::Loading;
            }
            entry.notify();
            (future, seq)
        };

        let cache = self.clone();
        let key = key.clone();
        let task = future.clone();
        tokio::spawn(async move {
            let result = task.await;
            cache.settle(&key, seq, result);
        });

        future
    }

    /// Applies a finished request. Results from anything but the newest
    /// request for the key are discarded.
    fn settle(&self, key: &QueryKey, seq: u64, result: QueryResult) {
        let mut entries = self.lock();
        let Some(entry) = entries.get_mut(key) else {
            debug!(cache.key = %key, "Entry removed before response arrived");
            return;
        };
        if entry.seq != seq {
            debug!(cache.key = %key, seq, latest = entry.seq, "Discarding superseded response");
            return;
        }

        entry.in_flight = None;
        match result {
            Ok(value) => {
                entry.data = Some(value);
                entry.error = None;
                entry.status = QueryStatus::Success;
                entry.invalidated = false;
                entry.last_fetched_at = Some(Instant::now());
            }
            Err(error) => {
                warn!(cache.key = %key, error = %error, "Query failed");
                entry.error = Some(error);
                entry.status = QueryStatus::Error;
            }
        }
        entry.notify();
    }

    pub(crate) fn in_flight(&self, key: &QueryKey) -> Option<SharedQuery> {
        self.lock()
            .get(key)
            .and_then(|e| e.in_flight.as_ref().map(|f| f.future.clone()))
    }

    /// True when a subscriber mounting now should fetch.
    pub(crate) fn needs_fetch(&self, key: &QueryKey, stale_time: Duration) -> bool {
        self.lock()
            .get(key)
            .is_none_or(|e| e.in_flight.is_none() && !e.is_fresh(stale_time))
    }

    pub(crate) fn mount(&self, key: &QueryKey, fetcher: &QueryFn) -> watch::Receiver<u64> {
        let mut entries = self.lock();
        let entry = entries.entry(key.clone()).or_insert_with(Entry::new);
        entry.subscribers += 1;
        entry.fetcher = Some(fetcher.clone());
        entry.last_used_at = Instant::now();
        entry.revision.subscribe()
    }

    pub(crate) fn unmount(&self, key: &QueryKey) {
        if let Some(entry) = self.lock().get_mut(key) {
            entry.subscribers = entry.subscribers.saturating_sub(1);
            entry.last_used_at = Instant::now();
        }
    }

    #[cfg(test)]
    pub(crate) fn subscribers(&self, key: &QueryKey) -> usize {
        self.lock().get(key).map_or(0, |e| e.subscribers)
    }

    fn next_seq(&self) -> u64 {
        self.inner.next_seq.fetch_add(1, Ordering::Relaxed)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(ClientError::decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    fn counting_fetcher(calls: Arc<AtomicUsize>, delay: Duration) -> QueryFn {
        QueryFn::new(move |_key| {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                sleep(delay).await;
                Ok::<_, ClientError>(json!({ "call": n }))
            }
        })
    }

    fn key(page: i64) -> QueryKey {
        QueryKey::new("students").with(json!({ "page": page }))
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_fetches_share_one_request() {
        let cache = QueryCache::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = counting_fetcher(calls.clone(), Duration::from_millis(50));

        let (a, b, c) = tokio::join!(
            cache.fetch_query::<Value>(key(1), fetcher.clone()),
            cache.fetch_query::<Value>(key(1), fetcher.clone()),
            cache.fetch_query::<Value>(key(1), fetcher.clone()),
        );

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(a.unwrap(), json!({ "call": 1 }));
        assert_eq!(b.unwrap(), json!({ "call": 1 }));
        assert_eq!(c.unwrap(), json!({ "call": 1 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_data_is_served_from_cache() {
        let cache = QueryCache::new(QueryConfig {
            stale_time: Duration::from_secs(60),
            ..QueryConfig::default()
        });
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = counting_fetcher(calls.clone(), Duration::ZERO);

        cache.fetch_query::<Value>(key(1), fetcher.clone()).await.unwrap();
        cache.fetch_query::<Value>(key(1), fetcher.clone()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        sleep(Duration::from_secs(61)).await;
        cache.fetch_query::<Value>(key(1), fetcher).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_keeps_previous_data() {
        let cache = QueryCache::default();
        cache.set_query_data(key(1), &json!({ "total": 3 })).unwrap();

        let failing = QueryFn::new(|_key| async {
            Err::<Value, _>(ClientError::http(500, Some("boom".into())))
        });
        let err = cache.fetch_query::<Value>(key(1), failing).await.unwrap_err();
        assert_eq!(err.message(), "boom");

        // settle runs on the spawned task
        sleep(Duration::from_millis(1)).await;
        let state = cache.state::<Value>(&key(1));
        assert!(state.is_error());
        assert_eq!(state.data, Some(json!({ "total": 3 })));
        assert_eq!(state.error.unwrap().message(), "boom");
    }

    #[tokio::test(start_paused = true)]
    async fn test_newest_request_wins() {
        let cache = QueryCache::default();
        let slow = QueryFn::new(|_key| async {
            sleep(Duration::from_millis(200)).await;
            Ok::<_, ClientError>(json!("old"))
        });
        let fast = QueryFn::new(|_key| async {
            sleep(Duration::from_millis(10)).await;
            Ok::<_, ClientError>(json!("new"))
        });

        let first = cache.start_fetch(&key(1), &slow, false);
        let second = cache.start_fetch(&key(1), &fast, true);
        assert_eq!(second.await.unwrap(), json!("new"));
        assert_eq!(first.await.unwrap(), json!("old"));

        sleep(Duration::from_millis(1)).await;
        assert_eq!(cache.get_query_data::<String>(&key(1)).as_deref(), Some("new"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_marks_by_prefix() {
        let cache = QueryCache::new(QueryConfig {
            stale_time: Duration::from_secs(60),
            ..QueryConfig::default()
        });
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = counting_fetcher(calls.clone(), Duration::ZERO);

        cache.fetch_query::<Value>(key(1), fetcher.clone()).await.unwrap();
        cache.fetch_query::<Value>(key(2), fetcher.clone()).await.unwrap();
        cache
            .fetch_query::<Value>(QueryKey::new("students-stats"), fetcher.clone())
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        assert_eq!(cache.invalidate(&QueryKey::new("students")), 2);
        // no subscribers: nothing refetched yet
        tokio::task::yield_now().await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        cache.fetch_query::<Value>(key(1), fetcher.clone()).await.unwrap();
        cache
            .fetch_query::<Value>(QueryKey::new("students-stats"), fetcher)
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_garbage_spares_recent_entries() {
        let cache = QueryCache::new(QueryConfig {
            stale_time: Duration::ZERO,
            gc_time: Duration::from_secs(300),
        });
        cache.set_query_data(key(1), &json!(1)).unwrap();
        sleep(Duration::from_secs(200)).await;
        cache.set_query_data(key(2), &json!(2)).unwrap();
        // key(1) was last used at creation
        cache.lock().get_mut(&key(2)).unwrap().last_used_at = Instant::now();

        sleep(Duration::from_secs(150)).await;
        assert_eq!(cache.collect_garbage(), 1);
        assert!(cache.get_query_data::<i64>(&key(1)).is_none());
        assert_eq!(cache.get_query_data::<i64>(&key(2)), Some(2));
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let cache = QueryCache::default();
        cache.set_query_data(key(1), &json!(1)).unwrap();
        cache.set_query_data(key(2), &json!(2)).unwrap();
        cache.set_query_data(QueryKey::new("courses"), &json!([])).unwrap();

        assert_eq!(cache.remove(&QueryKey::new("students")), 2);
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_response_from_before_clear_is_discarded() {
        let cache = QueryCache::default();
        let previous = QueryFn::new(|_key| async {
            sleep(Duration::from_millis(200)).await;
            Ok::<_, ClientError>(json!("previous-user"))
        });
        let current = QueryFn::new(|_key| async {
            sleep(Duration::from_millis(10)).await;
            Ok::<_, ClientError>(json!("current-user"))
        });

        let stale = cache.start_fetch(&key(1), &previous, false);
        cache.clear();
        let fresh = cache.start_fetch(&key(1), &current, false);
        assert_eq!(fresh.await.unwrap(), json!("current-user"));
        assert_eq!(stale.await.unwrap(), json!("previous-user"));

        sleep(Duration::from_millis(1)).await;
        assert_eq!(
            cache.get_query_data::<String>(&key(1)).as_deref(),
            Some("current-user")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_keeps_subscribed_entries_registered() {
        let cache = QueryCache::default();
        let fetcher = counting_fetcher(Arc::new(AtomicUsize::new(0)), Duration::ZERO);
        cache.set_query_data(key(2), &json!(2)).unwrap();
        let _revision = cache.mount(&key(1), &fetcher);
        cache.set_query_data(key(1), &json!(1)).unwrap();

        assert_eq!(cache.remove(&QueryKey::new("students")), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.subscribers(&key(1)), 1);
        let state = cache.state::<Value>(&key(1));
        assert_eq!(state.status, QueryStatus::Idle);
        assert!(state.data.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_local_write_wins_over_pending_fetch() {
        let cache = QueryCache::default();
        let server = QueryFn::new(|_key| async {
            sleep(Duration::from_millis(100)).await;
            Ok::<_, ClientError>(json!("server"))
        });

        let pending = cache.start_fetch(&key(1), &server, false);
        cache.set_query_data(key(1), &"local").unwrap();
        assert!(cache.in_flight(&key(1)).is_none());
        assert_eq!(pending.await.unwrap(), json!("server"));

        sleep(Duration::from_millis(1)).await;
        assert_eq!(cache.get_query_data::<String>(&key(1)).as_deref(), Some("local"));
    }
}
