use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
/// Broadcast bus for page events
///
/// The session controller publishes events here; view bindings subscribe
/// and render. This is the boundary that keeps the state machines free of
/// any page lookup: nothing below the bus touches rendered elements.
use std::sync::Arc;

/// Identifies one subscription for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(usize);

struct Subscriber<T> {
    id: SubscriberId,
    sender: Sender<T>,
}

/// Broadcasts cloned messages to every live subscriber.
pub struct EventBus<T> {
    subscribers: Arc<RwLock<Vec<Subscriber<T>>>>,
    next_id: Arc<RwLock<usize>>,
}

impl<T: Clone> EventBus<T> {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(RwLock::new(0)),
        }
    }

    /// Subscribe to events, returns a receiver and subscription ID
    pub fn subscribe(&self) -> (Receiver<T>, SubscriberId) {
        let (tx, rx) = unbounded();

        let mut next_id = self.next_id.write();
        let id = SubscriberId(*next_id);
        *next_id += 1;
        drop(next_id);

        self.subscribers.write().push(Subscriber { id, sender: tx });

        (rx, id)
    }

    /// Unsubscribe from events
    pub fn unsubscribe(&self, id: SubscriberId) {
        self.subscribers.write().retain(|s| s.id != id);
    }

    /// Publish an event to all subscribers. A closed subscriber channel is
    /// skipped; it is cleaned up on the next unsubscribe.
    pub fn publish(&self, event: T) {
        let subscribers = self.subscribers.read();
        for subscriber in subscribers.iter() {
            let _ = subscriber.sender.try_send(event.clone());
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl<T: Clone> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}
