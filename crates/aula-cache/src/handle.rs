//! Query subscriptions.
//!
//! A [`QueryHandle`] is what a page holds while it is on screen. Creating
//! one subscribes to its key and fetches when needed; dropping the last
//! clone unsubscribes and stops its poller. Any fetch still in flight at
//! that point finishes into the cache entry, never into the dropped page.

use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use aula_core::ClientError;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::query::{QueryCache, QueryFn, QueryState, decode};
use crate::schedule::ScheduledTask;
use crate::QueryKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Disabled handles neither fetch nor poll. Dependent queries start
    /// disabled until their input exists.
    pub enabled: bool,
    /// Poll period while subscribed.
    pub refetch_interval: Option<Duration>,
    /// Overrides the cache-wide stale time for this subscription.
    pub stale_time: Option<Duration>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            refetch_interval: None,
            stale_time: None,
        }
    }
}

impl QueryOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn refetch_interval(mut self, period: Duration) -> Self {
        self.refetch_interval = Some(period);
        self
    }

    pub fn stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = Some(stale_time);
        self
    }
}

struct Mount {
    key: QueryKey,
    options: QueryOptions,
    revision: watch::Receiver<u64>,
    poller: Option<ScheduledTask>,
}

struct HandleInner {
    cache: QueryCache,
    fetcher: QueryFn,
    mount: Mutex<Mount>,
}

impl HandleInner {
    /// Fetches if the current key needs it and (re)starts polling.
    fn activate(&self) {
        let mut mount = self.lock();
        mount.poller = None;
        if !mount.options.enabled {
            return;
        }

        let stale_time = mount
            .options
            .stale_time
            .unwrap_or(self.cache.config().stale_time);
        if self.cache.needs_fetch(&mount.key, stale_time) {
            drop(self.cache.start_fetch(&mount.key, &self.fetcher, false));
        }

        if let Some(period) = mount.options.refetch_interval {
            let cache = self.cache.clone();
            let key = mount.key.clone();
            let fetcher = self.fetcher.clone();
            mount.poller = Some(ScheduledTask::every(period, move || {
                let cache = cache.clone();
                let key = key.clone();
                let fetcher = fetcher.clone();
                async move {
                    let _ = cache.start_fetch(&key, &fetcher, false).await;
                }
            }));
        }
    }

    fn lock(&self) -> MutexGuard<'_, Mount> {
        self.mount.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for HandleInner {
    fn drop(&mut self) {
        let mount = self.mount.get_mut().unwrap_or_else(PoisonError::into_inner);
        mount.poller = None;
        self.cache.unmount(&mount.key);
    }
}

/// A live subscription to one query key.
pub struct QueryHandle<T> {
    inner: Arc<HandleInner>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for QueryHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mount = self.inner.lock();
        f.debug_struct("QueryHandle")
            .field("key", &mount.key)
            .field("enabled", &mount.options.enabled)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned> QueryHandle<T> {
    pub(crate) fn new(
        cache: QueryCache,
        key: QueryKey,
        fetcher: QueryFn,
        options: QueryOptions,
    ) -> Self {
        let revision = cache.mount(&key, &fetcher);
        let inner = Arc::new(HandleInner {
            cache,
            fetcher,
            mount: Mutex::new(Mount {
                key,
                options,
                revision,
                poller: None,
            }),
        });
        inner.activate();
        Self {
            inner,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> QueryKey {
        self.inner.lock().key.clone()
    }

    /// Current state for the current key.
    pub fn state(&self) -> QueryState<T> {
        let key = self.key();
        self.inner.cache.state(&key)
    }

    pub fn data(&self) -> Option<T> {
        self.state().data
    }

    /// Moves the subscription to `key` (new page, new filters).
    ///
    /// From here on the handle only reads the new key, so a slow response
    /// for the old params can land in its own entry but never shows here.
    pub fn set_key(&self, key: QueryKey) {
        {
            let mut mount = self.inner.lock();
            if mount.key == key {
                return;
            }
            self.inner.cache.unmount(&mount.key);
            mount.revision = self.inner.cache.mount(&key, &self.inner.fetcher);
            mount.key = key;
        }
        self.inner.activate();
    }

    pub fn set_enabled(&self, enabled: bool) {
        {
            let mut mount = self.inner.lock();
            if mount.options.enabled == enabled {
                return;
            }
            mount.options.enabled = enabled;
        }
        self.inner.activate();
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.lock().options.enabled
    }

    /// Fetches now, joining a request already in flight.
    pub async fn refetch(&self) -> Result<T, ClientError> {
        let key = self.key();
        let value = self
            .inner
            .cache
            .start_fetch(&key, &self.inner.fetcher, false)
            .await?;
        decode(value)
    }

    /// Waits until nothing is in flight for the current key and returns
    /// the resulting state.
    pub async fn settled(&self) -> QueryState<T> {
        loop {
            let key = self.key();
            match self.inner.cache.in_flight(&key) {
                Some(request) => {
                    let _ = request.await;
                    // let the settling task apply the result
                    tokio::task::yield_now().await;
                }
                None => return self.state(),
            }
        }
    }

    /// Waits for the next change to the current key's entry.
    ///
    /// Returns `false` if the entry was dropped from the cache.
    pub async fn changed(&self) -> bool {
        let mut revision = {
            let mut mount = self.inner.lock();
            mount.revision.borrow_and_update();
            mount.revision.clone()
        };
        revision.changed().await.is_ok()
    }
}
