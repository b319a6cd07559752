use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Weak,
    },
    time::Duration,
};

use {
    parking_lot::Mutex,
    serde::{Deserialize, Serialize},
    tokio::runtime::Handle,
    tracing::debug,
};

use crate::{
    config::StoresConfig,
    store::{Store, Subscription},
    toast::ExpiryTimer,
};

/// Identifier of a toast, unique within one [`ToastStore`].
pub type ToastId = u64;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

/// A short-lived notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

struct ToastInner {
    toasts: Store<Vec<Toast>>,
    counter: AtomicU64,
    timers: Mutex<HashMap<ToastId, ExpiryTimer>>,
    lifetime: Duration,
    handle: Handle,
}

/// Insertion-ordered queue of toasts that expire on their own.
///
/// Each [`add`](ToastStore::add) schedules an [`ExpiryTimer`] on the given
/// runtime. Removing a toast by hand cancels its timer; dropping the last
/// handle to the store cancels all of them.
#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<ToastInner>,
}

impl ToastStore {
    /// Create an empty store whose toasts live for `lifetime`; timers run on `handle`.
    pub fn new(lifetime: Duration, handle: Handle) -> Self {
        Self {
            inner: Arc::new(ToastInner {
                toasts: Store::new(Vec::new()),
                counter: AtomicU64::new(0),
                timers: Mutex::new(HashMap::new()),
                lifetime,
                handle,
            }),
        }
    }

    /// Create an empty store with the lifetime from `config`.
    pub fn from_config(config: &StoresConfig, handle: Handle) -> Self {
        Self::new(config.toast_lifetime(), handle)
    }

    /// Append a toast and schedule its expiry.
    ///
    /// Ids start at 1 and are never reused, even after removal.
    pub fn add(&self, message: impl Into<String>, kind: ToastKind) -> ToastId {
        let id = self.inner.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let toast = Toast {
            id,
            message: message.into(),
            kind,
        };
        debug!(id, ?kind, message = %toast.message, "add toast");
        self.inner.toasts.update(|toasts| toasts.push(toast));

        // Insert under the lock so an early expiry cannot miss its own entry.
        let mut timers = self.inner.timers.lock();
        let weak: Weak<ToastInner> = Arc::downgrade(&self.inner);
        let timer = ExpiryTimer::schedule(&self.inner.handle, self.inner.lifetime, move || {
            if let Some(inner) = weak.upgrade() {
                debug!(id, "toast expired");
                inner.remove(id);
            }
        });
        timers.insert(id, timer);
        id
    }

    /// Add an [`ToastKind::Info`] toast.
    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.add(message, ToastKind::Info)
    }

    /// Add a [`ToastKind::Success`] toast.
    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.add(message, ToastKind::Success)
    }

    /// Add a [`ToastKind::Error`] toast.
    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.add(message, ToastKind::Error)
    }

    /// Remove the toast with `id` and cancel its pending expiry.
    ///
    /// Unknown ids are ignored and do not notify subscribers.
    pub fn remove(&self, id: ToastId) {
        debug!(id, "remove toast");
        self.inner.remove(id);
    }

    /// Snapshot of the current toasts, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.inner.toasts.get()
    }

    /// Number of visible toasts.
    pub fn len(&self) -> usize {
        self.inner.toasts.read(Vec::len)
    }

    /// Whether no toast is visible.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of expiry timers that have not fired or been cancelled.
    pub fn pending_timers(&self) -> usize {
        self.inner.timers.lock().len()
    }

    /// How long each toast stays before expiring.
    pub fn lifetime(&self) -> Duration {
        self.inner.lifetime
    }

    /// Observe changes to the toast list.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[Toast]) + Send + Sync + 'static,
    {
        self.inner.toasts.subscribe(move |toasts| callback(toasts))
    }
}

impl ToastInner {
    fn remove(&self, id: ToastId) {
        let timer = self.timers.lock().remove(&id);
        // A timer removing its own entry aborts an already-finishing task.
        drop(timer);

        self.toasts.update_if(|toasts| {
            let before = toasts.len();
            toasts.retain(|t| t.id != id);
            toasts.len() != before
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::{
        task::yield_now,
        time::{advance, sleep},
    };

    const LIFETIME: Duration = Duration::from_millis(2000);

    fn store() -> ToastStore {
        ToastStore::new(LIFETIME, Handle::current())
    }

    async fn settle() {
        for _ in 0..3 {
            yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn add_then_expire() {
        let toasts = store();
        toasts.add("hi", ToastKind::Success);

        assert_eq!(
            toasts.toasts(),
            vec![Toast {
                id: 1,
                message: "hi".to_string(),
                kind: ToastKind::Success,
            }]
        );
        assert_eq!(toasts.pending_timers(), 1);

        sleep(LIFETIME + Duration::from_millis(1)).await;
        settle().await;

        assert!(toasts.is_empty());
        assert_eq!(toasts.pending_timers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn still_present_just_before_expiry() {
        let toasts = store();
        toasts.info("pending");

        advance(LIFETIME - Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(toasts.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ids_increase_and_kind_defaults_to_info() {
        let toasts = store();
        let first = toasts.add("same", ToastKind::default());
        let second = toasts.add("same", ToastKind::Error);
        let third = toasts.success("other");

        assert_eq!((first, second, third), (1, 2, 3));
        let kinds: Vec<_> = toasts.toasts().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![ToastKind::Info, ToastKind::Error, ToastKind::Success]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn ids_are_not_reused_after_removal() {
        let toasts = store();
        let first = toasts.info("a");
        toasts.remove(first);
        assert_eq!(toasts.info("b"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn remove_preserves_order_and_is_idempotent() {
        let toasts = store();
        toasts.info("a");
        let b = toasts.info("b");
        toasts.info("c");

        toasts.remove(b);
        let after_once = toasts.toasts();
        toasts.remove(b);
        toasts.remove(99);

        assert_eq!(toasts.toasts(), after_once);
        let messages: Vec<_> = after_once.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_remove_cancels_timer() {
        let toasts = store();
        let id = toasts.info("bye");
        toasts.remove(id);
        assert_eq!(toasts.pending_timers(), 0);

        let notified = Arc::new(AtomicU64::new(0));
        let notified_clone = notified.clone();
        let _sub = toasts.subscribe(move |_| {
            notified_clone.fetch_add(1, Ordering::SeqCst);
        });

        sleep(LIFETIME * 2).await;
        settle().await;
        assert_eq!(notified.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn each_toast_expires_on_its_own_schedule() {
        let toasts = store();
        toasts.info("early");
        sleep(Duration::from_millis(1000)).await;
        toasts.info("late");

        sleep(Duration::from_millis(1001)).await;
        settle().await;
        let remaining: Vec<_> = toasts.toasts().into_iter().map(|t| t.message).collect();
        assert_eq!(remaining, vec!["late".to_string()]);

        sleep(Duration::from_millis(1000)).await;
        settle().await;
        assert!(toasts.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_store_cancels_timers() {
        let toasts = store();
        toasts.info("orphan");
        let weak = Arc::downgrade(&toasts.inner);
        drop(toasts);

        assert!(weak.upgrade().is_none());
        sleep(LIFETIME * 2).await;
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_add_and_expiry() {
        let toasts = store();
        let lengths = Arc::new(Mutex::new(Vec::new()));
        let lengths_clone = lengths.clone();
        let _sub = toasts.subscribe(move |list| lengths_clone.lock().push(list.len()));

        toasts.info("one");
        toasts.info("two");
        sleep(LIFETIME + Duration::from_millis(1)).await;
        settle().await;

        assert_eq!(*lengths.lock(), vec![1, 2, 1, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_removes_notify_once() {
        for _ in 0..200 {
            let toasts = store();
            let id = toasts.info("race");
            let notified = Arc::new(AtomicU64::new(0));
            let notified_clone = notified.clone();
            let _sub = toasts.subscribe(move |_| {
                notified_clone.fetch_add(1, Ordering::SeqCst);
            });

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let toasts = toasts.clone();
                    std::thread::spawn(move || toasts.remove(id))
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert!(toasts.is_empty());
            assert_eq!(notified.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn toast_serializes_kind_as_type() {
        let toast = Toast {
            id: 3,
            message: "copied".to_string(),
            kind: ToastKind::Success,
        };
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": 3, "message": "copied", "type": "success" })
        );
    }
}
