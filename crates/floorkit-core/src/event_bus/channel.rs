//! Typed notification channel.
//!
//! One `Channel<T>` exists per event kind; the payload type is fixed by the
//! channel so listeners never downcast or match on event names.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

/// Subscription handle for unsubscribing from a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Configuration shared by every channel of an editor
#[derive(Debug, Clone)]
pub struct ChannelConfig {
    /// Capacity of the broadcast buffer backing async receivers.
    pub capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Synchronous fan-out channel carrying payloads of type `T`.
///
/// Handlers run on the emitting thread in registration order. A handler may
/// subscribe or unsubscribe on the same channel; the change takes effect on
/// the next emission.
pub struct Channel<T: Clone + Send + 'static> {
    name: &'static str,
    sender: broadcast::Sender<T>,
    handlers: RwLock<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T: Clone + Send + 'static> Channel<T> {
    pub fn new(name: &'static str) -> Self {
        Self::with_config(name, &ChannelConfig::default())
    }

    pub fn with_config(name: &'static str, config: &ChannelConfig) -> Self {
        // broadcast::channel panics on a zero capacity
        let (sender, _) = broadcast::channel(config.capacity.max(1));
        Self {
            name,
            sender,
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Register a listener.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().push((id, Arc::new(handler)));
        tracing::debug!(channel = self.name, "Subscription {} added", id);
        id
    }

    /// Remove a listener. Returns true if the subscription was found.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        let before = handlers.len();
        handlers.retain(|(sid, _)| *sid != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!(channel = self.name, "Subscription {} removed", id);
        }
        removed
    }

    /// Remove every listener.
    pub fn clear(&self) {
        self.handlers.write().clear();
    }

    /// Get a receiver for async consumers.
    pub fn receiver(&self) -> broadcast::Receiver<T> {
        self.sender.subscribe()
    }

    /// Deliver `payload` to every listener and async receiver.
    ///
    /// Returns how many listeners and receivers were reached.
    pub fn emit(&self, payload: T) -> usize {
        let handlers: Vec<Handler<T>> = self
            .handlers
            .read()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();

        for handler in &handlers {
            handler(&payload);
        }

        let receivers = self.sender.send(payload).unwrap_or(0);
        handlers.len() + receivers
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }
}

impl<T: Clone + Send + 'static> std::fmt::Debug for Channel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
