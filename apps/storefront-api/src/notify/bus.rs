//! In-process publish/subscribe bus.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         EventBus                                        │
//! │                                                                         │
//! │  "user_notifications" ──► broadcast::Sender ──┬──► Receiver (socket 1) │
//! │                                               ├──► Receiver (socket 2) │
//! │                                               └──► Receiver (socket n) │
//! │                                                                         │
//! │  • at-most-once: no subscribers → message dropped                       │
//! │  • bounded: a subscriber more than `capacity` behind skips messages     │
//! │  • publish never waits on subscribers                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use storefront_core::Notification;

/// Topic name → broadcast channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EventBus {
    inner: Arc<BusInner>,
}

#[derive(Debug)]
struct BusInner {
    capacity: usize,
    topics: RwLock<HashMap<String, broadcast::Sender<Notification>>>,
}

impl EventBus {
    /// Creates a bus whose topics buffer up to `capacity` messages per subscriber.
    ///
    /// `capacity` must be non-zero.
    pub fn new(capacity: usize) -> Self {
        EventBus {
            inner: Arc::new(BusInner {
                capacity,
                topics: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Registers a new subscriber on `topic`, creating the topic on first use.
    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<Notification> {
        let mut topics = self.inner.topics.write().await;
        let sender = topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.inner.capacity).0);

        debug!(topic = %topic, subscribers = sender.receiver_count() + 1, "Subscriber added");
        sender.subscribe()
    }

    /// Publishes to every current subscriber of `topic`.
    ///
    /// ## Returns
    /// How many subscribers the message was queued for (0 means it was dropped).
    pub async fn publish(&self, topic: &str, message: Notification) -> usize {
        let topics = self.inner.topics.read().await;

        let delivered = match topics.get(topic) {
            // send fails only when there are no receivers
            Some(sender) => sender.send(message).unwrap_or(0),
            None => 0,
        };

        debug!(topic = %topic, delivered, "Notification published");
        delivered
    }

    /// Number of live subscribers on `topic`.
    ///
    /// Only tests read this, to wait for sockets to attach or detach.
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        self.inner
            .topics
            .read()
            .await
            .get(topic)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::{RecvError, TryRecvError};

    const TOPIC: &str = "user_notifications";

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let bus = EventBus::new(4);
        assert_eq!(bus.publish(TOPIC, Notification::new_user()).await, 0);

        // A late subscriber does not see earlier messages
        let mut rx = bus.subscribe(TOPIC).await;
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_every_subscriber_receives() {
        let bus = EventBus::new(4);
        let mut first = bus.subscribe(TOPIC).await;
        let mut second = bus.subscribe(TOPIC).await;
        assert_eq!(bus.subscriber_count(TOPIC).await, 2);

        assert_eq!(bus.publish(TOPIC, Notification::new_user()).await, 2);
        assert_eq!(first.recv().await.unwrap(), Notification::new_user());
        assert_eq!(second.recv().await.unwrap(), Notification::new_user());
    }

    #[tokio::test]
    async fn test_topics_are_isolated() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe("other").await;

        assert_eq!(bus.publish(TOPIC, Notification::new_user()).await, 0);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_lagging_subscriber_skips() {
        let bus = EventBus::new(1);
        let mut rx = bus.subscribe(TOPIC).await;

        bus.publish(TOPIC, Notification::new_user()).await;
        bus.publish(TOPIC, Notification::new_user()).await;

        assert!(matches!(rx.recv().await, Err(RecvError::Lagged(1))));
        assert!(rx.recv().await.is_ok());
    }

    #[tokio::test]
    async fn test_dropped_receiver_unsubscribes() {
        let bus = EventBus::new(4);
        let rx = bus.subscribe(TOPIC).await;
        drop(rx);
        assert_eq!(bus.subscriber_count(TOPIC).await, 0);
    }
}
