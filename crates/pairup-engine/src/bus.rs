//! Synchronous, topic-based fan-out of workspace events.
//!
//! The bus does not queue or persist events — a subscriber that blocks blocks
//! the publisher. It models the source's dynamic-typed callback dispatch as a
//! tagged [`Event`] variant: subscribers receive the variant directly and
//! match on it instead of going through a runtime type switch.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::events::Event;

/// A callback registered with an [`EventBus`].
pub type Subscriber = Box<dyn Fn(&Event) + Send + Sync>;

/// A handle returned by [`EventBus::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// Fan-out point for workspace state changes.
///
/// Subscription and unsubscription are thread-safe and take effect for
/// subsequent publishes only — a publish in flight always reaches the
/// subscriber set as it stood when `publish` was called.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_id: AtomicU64,
}

impl EventBus {
    /// An empty bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` to receive every subsequently published event.
    pub fn subscribe(&self, callback: impl Fn(&Event) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. A no-op if `id` is already unsubscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.lock().retain(|(sub_id, _)| *sub_id != id);
    }

    /// Deliver `event` to every currently-registered subscriber, in
    /// registration order. Subscribers run synchronously on the caller's
    /// thread and must not call back into the workspace state.
    pub fn publish(&self, event: &Event) {
        for (_, subscriber) in self.subscribers.lock().iter() {
            subscriber(event);
        }
    }

    /// Number of currently-registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn subscriber_registered_before_publish_receives_it_once() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        bus.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        bus.publish(&Event::CloseFile { file_id: 0 });
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unsubscribed_subscriber_receives_nothing() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        let id = bus.subscribe(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        bus.unsubscribe(id);

        bus.publish(&Event::CloseFile { file_id: 0 });
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn fan_out_is_deterministic_across_subscribers() {
        let bus = EventBus::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in 0..3 {
            let order = order.clone();
            bus.subscribe(move |_| order.lock().push(tag));
        }

        bus.publish(&Event::CloseFile { file_id: 0 });
        assert_eq!(*order.lock(), vec![0, 1, 2]);
    }
}
