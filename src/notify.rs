//! Ephemeral toast queue.
//!
//! Mutations push short-lived messages here; each toast removes itself a
//! fixed delay after its own enqueue, on an independent timer. Removal of
//! one toast never touches another's remaining lifetime, and no consumer
//! acknowledgment exists; display code only ever reads snapshots.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::types::{Toast, ToastKind};

/// How long a toast stays visible.
const TOAST_TTL: Duration = Duration::from_secs(3);

/// Shared queue of pending toasts, insertion-ordered.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<Vec<Toast>>>,
    ttl: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::with_ttl(TOAST_TTL)
    }

    /// Queue with a custom lifetime. Tests use short TTLs.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    /// Enqueue a message and schedule its expiry.
    ///
    /// Must be called from within a Tokio runtime; the expiry timer is a
    /// spawned task that removes exactly this toast when it fires.
    pub fn push(&self, message: impl Into<String>, kind: ToastKind) -> Toast {
        let toast = Toast {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            kind,
            created_at: Utc::now(),
        };
        self.inner.lock().push(toast.clone());

        let inner = Arc::clone(&self.inner);
        let id = toast.id.clone();
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            inner.lock().retain(|t| t.id != id);
        });

        toast
    }

    pub fn success(&self, message: impl Into<String>) -> Toast {
        self.push(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> Toast {
        self.push(message, ToastKind::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> Toast {
        self.push(message, ToastKind::Info)
    }

    /// Current pending toasts, in insertion order.
    pub fn snapshot(&self) -> Vec<Toast> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn toast_expires_after_ttl() {
        let queue = ToastQueue::with_ttl(Duration::from_millis(40));
        queue.success("Nouveau contact créé");
        assert_eq!(queue.snapshot().len(), 1);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(queue.snapshot().is_empty());
    }

    #[tokio::test]
    async fn expiry_is_per_toast() {
        let queue = ToastQueue::with_ttl(Duration::from_millis(80));
        queue.info("first");
        tokio::time::sleep(Duration::from_millis(50)).await;
        queue.info("second");

        // First expires, second is still pending.
        tokio::time::sleep(Duration::from_millis(60)).await;
        let pending = queue.snapshot();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].message, "second");

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(queue.snapshot().is_empty());
    }

    #[tokio::test]
    async fn snapshot_preserves_insertion_order() {
        let queue = ToastQueue::with_ttl(Duration::from_secs(5));
        queue.success("a");
        queue.error("b");
        queue.info("c");
        let messages: Vec<_> = queue.snapshot().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
    }
}
