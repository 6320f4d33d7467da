//! Event Dispatch
//!
//! Delivery of named events to the listening contexts of a scope. The router
//! hands every event to an [`EventDispatcher`] synchronously; what happens
//! next (fan-out, buffering, loss when nobody listens) is the dispatcher's
//! business.
//!
//! # Implementations
//!
//! - [`BroadcastDispatcher`]: One tokio broadcast channel per scope. Each
//!   subscriber is a listening context.
//! - [`RecordingDispatcher`]: Keeps every event in memory, for tests and
//!   diagnostics.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;
use tracing::debug;

/// Receives named events for a scope
pub trait EventDispatcher: Send + Sync {
    /// Deliver `event_name` with its JSON argument list to every listening
    /// context of `scope`
    fn dispatch_event(&self, scope: &str, event_name: &str, json_args: &str);
}

/// One delivered event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedEvent {
    pub scope: String,
    pub name: String,
    pub json_args: String,
}

impl DispatchedEvent {
    /// Parse the argument list back into JSON
    pub fn args(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.json_args)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Fans events out to tokio broadcast subscribers, one channel per scope
pub struct BroadcastDispatcher {
    capacity: usize,
    channels: Mutex<HashMap<String, broadcast::Sender<DispatchedEvent>>>,
}

impl BroadcastDispatcher {
    /// `capacity` bounds how many events a slow listener may lag behind
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Open a listening context for `scope`
    pub fn subscribe(&self, scope: &str) -> broadcast::Receiver<DispatchedEvent> {
        lock(&self.channels)
            .entry(scope.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Number of live listening contexts for `scope`
    pub fn listener_count(&self, scope: &str) -> usize {
        lock(&self.channels)
            .get(scope)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

impl EventDispatcher for BroadcastDispatcher {
    fn dispatch_event(&self, scope: &str, event_name: &str, json_args: &str) {
        let channels = lock(&self.channels);
        let Some(sender) = channels.get(scope) else {
            debug!("No listeners in scope {}, dropping {}", scope, event_name);
            return;
        };
        let event = DispatchedEvent {
            scope: scope.to_string(),
            name: event_name.to_string(),
            json_args: json_args.to_string(),
        };
        // Ignore errors if no subscribers remain
        let _ = sender.send(event);
    }
}

/// Captures events in dispatch order
#[derive(Default)]
pub struct RecordingDispatcher {
    events: Mutex<Vec<DispatchedEvent>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<DispatchedEvent> {
        lock(&self.events).clone()
    }

    /// Drain the recorded events
    pub fn take(&self) -> Vec<DispatchedEvent> {
        std::mem::take(&mut *lock(&self.events))
    }

    /// Event names in dispatch order
    pub fn names(&self) -> Vec<String> {
        lock(&self.events).iter().map(|e| e.name.clone()).collect()
    }
}

impl EventDispatcher for RecordingDispatcher {
    fn dispatch_event(&self, scope: &str, event_name: &str, json_args: &str) {
        lock(&self.events).push(DispatchedEvent {
            scope: scope.to_string(),
            name: event_name.to_string(),
            json_args: json_args.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_broadcast_reaches_every_listener_of_scope() {
        let dispatcher = BroadcastDispatcher::new(8);
        let mut first = dispatcher.subscribe("profile");
        let mut second = dispatcher.subscribe("profile");
        let mut other = dispatcher.subscribe("incognito");
        assert_eq!(dispatcher.listener_count("profile"), 2);

        dispatcher.dispatch_event("profile", "bookmark-removed", r#"[{"parentId":2,"index":0}]"#);

        let event = first.try_recv().unwrap();
        assert_eq!(event.name, "bookmark-removed");
        assert_eq!(event.args().unwrap(), json!([{"parentId": 2, "index": 0}]));
        assert_eq!(second.try_recv().unwrap(), event);
        assert!(other.try_recv().is_err());
    }

    #[test]
    fn test_broadcast_without_listeners_is_dropped() {
        let dispatcher = BroadcastDispatcher::new(0);
        dispatcher.dispatch_event("nobody", "bookmark-changed", "[]");
        assert_eq!(dispatcher.listener_count("nobody"), 0);
    }

    #[test]
    fn test_recording_dispatcher() {
        let dispatcher = RecordingDispatcher::new();
        dispatcher.dispatch_event("s", "bookmark-added", "[]");
        dispatcher.dispatch_event("s", "bookmark-moved", "[]");

        assert_eq!(dispatcher.names(), vec!["bookmark-added", "bookmark-moved"]);
        assert_eq!(dispatcher.take().len(), 2);
        assert!(dispatcher.events().is_empty());
    }
}
