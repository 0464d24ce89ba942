//! The mutation executor.
//!
//! A [`Mutation`] wraps one write. On success it invalidates its keys and
//! then runs its success callbacks in registration order; on failure it
//! runs its error callbacks and touches nothing else. Writes are never
//! retried.

use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use aula_core::ClientError;
use aula_observability::track_mutation;
use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use crate::{QueryCache, QueryKey};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationError {
    /// A previous call has not finished yet.
    #[error("A previous request is still being processed")]
    Pending,

    #[error(transparent)]
    Failed(#[from] ClientError),
}

impl MutationError {
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn client_error(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Pending => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error(ClientError),
}

type MutateFn<I, O> = Box<dyn Fn(I) -> BoxFuture<'static, Result<O, ClientError>> + Send + Sync>;
type SuccessFn<O> = Box<dyn Fn(&O) + Send + Sync>;
type ErrorFn = Box<dyn Fn(&ClientError) + Send + Sync>;

pub struct Mutation<I, O> {
    cache: QueryCache,
    mutate_fn: MutateFn<I, O>,
    invalidates: Vec<QueryKey>,
    on_success: Vec<SuccessFn<O>>,
    on_error: Vec<ErrorFn>,
    status: Mutex<MutationStatus>,
}

impl<I, O> fmt::Debug for Mutation<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutation")
            .field("invalidates", &self.invalidates)
            .field("status", &*self.lock())
            .finish_non_exhaustive()
    }
}

impl<I, O> Mutation<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn new<F, Fut>(cache: QueryCache, mutate: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, ClientError>> + Send + 'static,
    {
        Self {
            cache,
            mutate_fn: Box::new(move |input| mutate(input).boxed()),
            invalidates: Vec::new(),
            on_success: Vec::new(),
            on_error: Vec::new(),
            status: Mutex::new(MutationStatus::Idle),
        }
    }

    /// Invalidates `prefix` after every successful call.
    pub fn invalidates(mut self, prefix: QueryKey) -> Self {
        self.invalidates.push(prefix);
        self
    }

    pub fn invalidates_all(mut self, prefixes: impl IntoIterator<Item = QueryKey>) -> Self {
        self.invalidates.extend(prefixes);
        self
    }

    pub fn on_success(mut self, callback: impl Fn(&O) + Send + Sync + 'static) -> Self {
        self.on_success.push(Box::new(callback));
        self
    }

    pub fn on_error(mut self, callback: impl Fn(&ClientError) + Send + Sync + 'static) -> Self {
        self.on_error.push(Box::new(callback));
        self
    }

    /// Runs the write.
    ///
    /// Returns [`MutationError::Pending`] without calling the server while
    /// an earlier call is still running.
    pub async fn mutate(&self, input: I) -> Result<O, MutationError> {
        let _guard = {
            let mut status = self.lock();
            if *status == MutationStatus::Pending {
                debug!("Mutation rejected: already pending");
                return Err(MutationError::Pending);
            }
            *status = MutationStatus::Pending;
            PendingGuard { status: &self.status }
        };

        match (self.mutate_fn)(input).await {
            Ok(output) => {
                for prefix in &self.invalidates {
                    self.cache.invalidate(prefix);
                }
                *self.lock() = MutationStatus::Success;
                track_mutation("success");
                for callback in &self.on_success {
                    callback(&output);
                }
                Ok(output)
            }
            Err(error) => {
                warn!(error = %error, "Mutation failed");
                *self.lock() = MutationStatus::Error(error.clone());
                track_mutation("error");
                for callback in &self.on_error {
                    callback(&error);
                }
                Err(MutationError::Failed(error))
            }
        }
    }

    pub fn status(&self) -> MutationStatus {
        self.lock().clone()
    }

    pub fn is_pending(&self) -> bool {
        *self.lock() == MutationStatus::Pending
    }

    /// Back to idle, e.g. when a modal is reopened.
    pub fn reset(&self) {
        let mut status = self.lock();
        if *status != MutationStatus::Pending {
            *status = MutationStatus::Idle;
        }
    }
}

impl<I, O> Mutation<I, O> {
    fn lock(&self) -> MutexGuard<'_, MutationStatus> {
        self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears `Pending` if the caller drops `mutate` before it finishes.
struct PendingGuard<'a> {
    status: &'a Mutex<MutationStatus>,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        if *status == MutationStatus::Pending {
            *status = MutationStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryFn;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::time::sleep;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) + Clone) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let writer = log.clone();
        (log, move |line: &str| writer.lock().unwrap().push(line.to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_invalidates_then_runs_callbacks_in_order() {
        let cache = QueryCache::new(aula_config::QueryConfig {
            stale_time: Duration::from_secs(60),
            ..Default::default()
        });
        let page = QueryKey::new("students").with(json!({ "page": 1 }));
        cache.set_query_data(page.clone(), &json!([])).unwrap();
        assert!(!cache.is_stale(&page));

        let (log, record) = recorder();
        let (close, toast) = (record.clone(), record);
        let seen_by_callback = cache.clone();
        let mutation = Mutation::new(cache.clone(), |name: String| async move {
            Ok::<_, ClientError>(json!({ "name": name }))
        })
        .invalidates(QueryKey::new("students"))
        .on_success(move |_| {
            close(&format!("close-modal stale={}", seen_by_callback.is_stale(&page)));
        })
        .on_success(move |created: &Value| toast(&format!("toast:{}", created["name"])));

        let out = mutation.mutate("Ana".to_string()).await.unwrap();
        assert_eq!(out["name"], "Ana");
        assert_eq!(mutation.status(), MutationStatus::Success);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["close-modal stale=true", "toast:\"Ana\""]
        );
    }

    #[tokio::test]
    async fn test_failure_runs_error_callbacks_without_invalidating() {
        let cache = QueryCache::new(aula_config::QueryConfig {
            stale_time: Duration::from_secs(60),
            ..Default::default()
        });
        let key = QueryKey::new("students").with(json!({ "page": 1 }));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let fetcher = QueryFn::new(move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ClientError>(json!([]))
            }
        });
        cache.fetch_query::<Value>(key.clone(), fetcher.clone()).await.unwrap();

        let (log, record) = recorder();
        let mutation = Mutation::new(cache.clone(), |_: ()| async {
            Err::<Value, _>(ClientError::http(500, Some("DNI duplicado".into())))
        })
        .invalidates(QueryKey::new("students"))
        .on_error(move |e| record(&e.message()));

        let err = mutation.mutate(()).await.unwrap_err();
        assert_eq!(err.message(), "DNI duplicado");
        assert_eq!(*log.lock().unwrap(), vec!["DNI duplicado"]);
        assert!(matches!(mutation.status(), MutationStatus::Error(_)));

        // entry still fresh: no refetch
        cache.fetch_query::<Value>(key, fetcher).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_call_while_pending_is_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let mutation = Mutation::new(QueryCache::default(), move |_: ()| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                sleep(Duration::from_millis(100)).await;
                Ok::<_, ClientError>(())
            }
        });

        let (first, second) = tokio::join!(mutation.mutate(()), async {
            tokio::task::yield_now().await;
            assert!(mutation.is_pending());
            mutation.mutate(()).await
        });
        assert!(first.is_ok());
        assert_eq!(second, Err(MutationError::Pending));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!mutation.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_call_releases_pending() {
        let mutation = Mutation::new(QueryCache::default(), |_: ()| async {
            sleep(Duration::from_secs(10)).await;
            Ok::<_, ClientError>(())
        });

        let attempt = tokio::time::timeout(Duration::from_millis(10), mutation.mutate(())).await;
        assert!(attempt.is_err());
        assert_eq!(mutation.status(), MutationStatus::Idle);
    }
}
