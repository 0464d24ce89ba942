use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use aula_config::ToastConfig;
use aula_observability::track_toast;
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Success,
    /// Errors.
    Destructive,
}

impl ToastVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastVariant::Default => "default",
            ToastVariant::Success => "success",
            ToastVariant::Destructive => "destructive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(Uuid);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastRequest {
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

impl ToastRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title)
            .description(description)
            .variant(ToastVariant::Success)
    }

    /// Error toast; `description` is shown verbatim (usually the server message).
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title)
            .description(description)
            .variant(ToastVariant::Destructive)
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn variant(mut self, variant: ToastVariant) -> Self {
        self.variant = variant;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub title: String,
    pub description: Option<String>,
    pub variant: ToastVariant,
    pub auto_expire_at: DateTime<Utc>,
}

struct ToasterInner {
    queue: watch::Sender<Vec<Toast>>,
    duration: Duration,
}

/// The toast queue. Clones share one queue.
#[derive(Clone)]
pub struct Toaster {
    inner: Arc<ToasterInner>,
}

impl fmt::Debug for Toaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toaster")
            .field("active", &self.inner.queue.borrow().len())
            .field("duration", &self.inner.duration)
            .finish()
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new(&ToastConfig::default())
    }
}

impl Toaster {
    pub fn new(config: &ToastConfig) -> Self {
        Self {
            inner: Arc::new(ToasterInner {
                queue: watch::channel(Vec::new()).0,
                duration: config.duration,
            }),
        }
    }

    /// Shows a toast and schedules its dismissal.
    ///
    /// Identical toasts are not merged.
    pub fn toast(&self, request: ToastRequest) -> ToastId {
        let id = ToastId(Uuid::new_v4());
        let duration = self.inner.duration;
        let expires_in = chrono::Duration::from_std(duration).unwrap_or(chrono::Duration::MAX);
        let toast = Toast {
            id,
            title: request.title,
            description: request.description,
            variant: request.variant,
            auto_expire_at: Utc::now()
                .checked_add_signed(expires_in)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };

        debug!(toast.id = %id, toast.variant = toast.variant.as_str(), title = %toast.title, "Toast shown");
        track_toast(toast.variant.as_str());
        self.inner.queue.send_modify(|queue| queue.push(toast));

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                // Weak: a pending timer must not keep a dropped toaster alive.
                let inner: Weak<ToasterInner> = Arc::downgrade(&self.inner);
                runtime.spawn(async move {
                    tokio::time::sleep(duration).await;
                    if let Some(inner) = inner.upgrade() {
                        remove(&inner, id);
                    }
                });
            }
            Err(_) => warn!(toast.id = %id, "No runtime: toast will not auto-dismiss"),
        }

        id
    }

    /// Removes a toast. Returns `false` if it was already gone.
    pub fn dismiss(&self, id: ToastId) -> bool {
        remove(&self.inner, id)
    }

    pub fn dismiss_all(&self) {
        self.inner.queue.send_if_modified(|queue| {
            let had_any = !queue.is_empty();
            queue.clear();
            had_any
        });
    }

    /// Active toasts, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.inner.queue.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.inner.queue.subscribe()
    }
}

fn remove(inner: &ToasterInner, id: ToastId) -> bool {
    inner.queue.send_if_modified(|queue| {
        let before = queue.len();
        queue.retain(|t| t.id != id);
        queue.len() != before
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toaster(ms: u64) -> Toaster {
        Toaster::new(&ToastConfig {
            duration: Duration::from_millis(ms),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_toasts_keep_insertion_order_and_expire() {
        let toaster = toaster(5000);
        toaster.toast(ToastRequest::success("Student created", "Ana was added"));
        tokio::time::sleep(Duration::from_secs(1)).await;
        toaster.toast(ToastRequest::error("Error", "DNI duplicado"));

        let titles: Vec<_> = toaster.active().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Student created", "Error"]);

        tokio::time::sleep(Duration::from_millis(4500)).await;
        assert_eq!(toaster.active().len(), 1);
        assert_eq!(toaster.active()[0].description.as_deref(), Some("DNI duplicado"));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(toaster.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_is_idempotent() {
        let toaster = toaster(5000);
        let id = toaster.toast(ToastRequest::new("Saved"));
        assert!(toaster.dismiss(id));
        assert!(!toaster.dismiss(id));

        // the timer firing later is a no-op
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(toaster.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_identical_toasts_are_not_merged() {
        let toaster = toaster(5000);
        toaster.toast(ToastRequest::new("Saved"));
        toaster.toast(ToastRequest::new("Saved"));
        assert_eq!(toaster.active().len(), 2);
        toaster.dismiss_all();
        assert!(toaster.active().is_empty());
    }

    #[tokio::test]
    async fn test_subscriber_sees_new_toasts() {
        let toaster = toaster(5000);
        let mut rx = toaster.subscribe();
        toaster.toast(ToastRequest::error("Error", "Connection error. Please try again."));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow()[0].variant, ToastVariant::Destructive);
    }

    #[test]
    fn test_toast_without_runtime_does_not_panic() {
        let toaster = toaster(5000);
        toaster.toast(ToastRequest::new("Offline"));
        assert_eq!(toaster.active().len(), 1);
    }
}
