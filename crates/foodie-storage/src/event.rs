//! Storage change notifications.
//!
//! Every write or delete through a [`Storage`](crate::Storage) handle is
//! broadcast to all other handles open on the same backend, mirroring how a
//! browser fires `storage` events in every tab except the writer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

/// Number of notifications buffered per subscriber before it starts lagging.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Identifies one execution context (a tab, a process, a test fixture).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextId(u64);

impl ContextId {
    /// Allocate a fresh process-unique context ID.
    pub fn generate() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw numeric value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx-{}", self.0)
    }
}

/// A key was written or deleted by some context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that changed.
    pub key: String,
    /// The raw value after the change, or `None` if the key was deleted.
    pub new_value: Option<String>,
    /// The context that performed the change.
    pub origin: ContextId,
}

/// Receives notifications written by other contexts.
///
/// Draining is non-blocking so callers on a single-threaded event loop can
/// poll between operations.
#[derive(Debug)]
pub struct Subscription {
    receiver: broadcast::Receiver<StorageEvent>,
    context: ContextId,
}

impl Subscription {
    pub(crate) fn new(receiver: broadcast::Receiver<StorageEvent>, context: ContextId) -> Self {
        Self { receiver, context }
    }

    /// Take the next pending event from another context, if any.
    ///
    /// Events written by this subscription's own context are skipped. When
    /// the subscriber has fallen behind, the oldest events are dropped and
    /// draining resumes from the oldest retained one.
    pub fn try_next(&mut self) -> Option<StorageEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.origin == self.context => continue,
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    debug!(context = %self.context, skipped, "storage subscriber lagged");
                    continue;
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain every pending event for `key`, oldest first.
    pub fn drain_key(&mut self, key: &str) -> Vec<StorageEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_next() {
            if event.key == key {
                events.push(event);
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(key: &str, value: &str, origin: ContextId) -> StorageEvent {
        StorageEvent {
            key: key.to_string(),
            new_value: Some(value.to_string()),
            origin,
        }
    }

    #[test]
    fn test_context_ids_are_unique() {
        let a = ContextId::generate();
        let b = ContextId::generate();
        assert_ne!(a, b);
        assert!(a.to_string().starts_with("ctx-"));
    }

    #[test]
    fn test_own_events_are_skipped() {
        let (tx, rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let me = ContextId::generate();
        let other = ContextId::generate();
        let mut sub = Subscription::new(rx, me);

        tx.send(event("cart", "1", me)).unwrap();
        tx.send(event("cart", "2", other)).unwrap();

        let received = sub.try_next().unwrap();
        assert_eq!(received.new_value.as_deref(), Some("2"));
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn test_drain_key_filters_other_keys() {
        let (tx, rx) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let other = ContextId::generate();
        let mut sub = Subscription::new(rx, ContextId::generate());

        tx.send(event("cart", "a", other)).unwrap();
        tx.send(event("prefs", "b", other)).unwrap();
        tx.send(event("cart", "c", other)).unwrap();

        let values: Vec<_> = sub
            .drain_key("cart")
            .into_iter()
            .filter_map(|e| e.new_value)
            .collect();
        assert_eq!(values, vec!["a", "c"]);
    }

    #[test]
    fn test_lagged_subscriber_keeps_newest() {
        let (tx, rx) = broadcast::channel(2);
        let other = ContextId::generate();
        let mut sub = Subscription::new(rx, ContextId::generate());

        for i in 0..5 {
            tx.send(event("cart", &i.to_string(), other)).unwrap();
        }

        let values: Vec<_> = sub
            .drain_key("cart")
            .into_iter()
            .filter_map(|e| e.new_value)
            .collect();
        assert_eq!(values, vec!["3", "4"]);
    }
}
