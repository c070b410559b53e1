//! Typed model-selection channel
//!
//! Components that care about the current model subscribe at startup and
//! drop their [`ModelSubscription`] on teardown. Publishing with no
//! subscribers is not an error.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Buffered events per subscriber before the oldest are dropped
pub const DEFAULT_CAPACITY: usize = 16;

/// Payload published when the selected model changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSelected {
    /// Newly selected model identifier
    pub model: String,
}

/// Process-wide publish/subscribe channel for model changes
#[derive(Debug, Clone)]
pub struct ModelSelectionBus {
    sender: broadcast::Sender<ModelSelected>,
}

impl ModelSelectionBus {
    /// Create bus with a per-subscriber buffer
    #[inline]
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a change; returns the number of subscribers reached
    pub fn publish(&self, event: ModelSelected) -> usize {
        match self.sender.send(event) {
            Ok(n) => n,
            Err(_) => {
                tracing::debug!("Model selection published with no subscribers");
                0
            }
        }
    }

    /// Register a subscriber
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> ModelSubscription {
        ModelSubscription {
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of live subscriptions
    #[inline]
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ModelSelectionBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Live subscription; dropping it unsubscribes
#[derive(Debug)]
pub struct ModelSubscription {
    receiver: broadcast::Receiver<ModelSelected>,
}

impl ModelSubscription {
    /// Wait for the next change
    ///
    /// Returns `None` once the bus is gone. A subscriber that fell behind
    /// skips straight to the oldest event still buffered.
    pub async fn next(&mut self) -> Option<ModelSelected> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!("Model subscriber lagged, skipped {} events", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take a pending change without waiting
    pub fn try_next(&mut self) -> Option<ModelSelected> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(model: &str) -> ModelSelected {
        ModelSelected {
            model: model.to_string(),
        }
    }

    #[tokio::test]
    async fn subscribers_receive_events() {
        let bus = ModelSelectionBus::default();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        assert_eq!(bus.publish(selected("mistral")), 2);
        assert_eq!(a.next().await, Some(selected("mistral")));
        assert_eq!(b.next().await, Some(selected("mistral")));
    }

    #[test]
    fn publish_without_subscribers() {
        let bus = ModelSelectionBus::default();
        assert_eq!(bus.publish(selected("phi3")), 0);
    }

    #[test]
    fn drop_unsubscribes() {
        let bus = ModelSelectionBus::default();
        let sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn lagged_subscriber_keeps_newest() {
        let bus = ModelSelectionBus::new(2);
        let mut sub = bus.subscribe();
        for model in ["a", "b", "c", "d"] {
            bus.publish(selected(model));
        }
        assert_eq!(sub.try_next(), Some(selected("c")));
        assert_eq!(sub.try_next(), Some(selected("d")));
        assert_eq!(sub.try_next(), None);
    }

    #[tokio::test]
    async fn next_returns_none_when_bus_dropped() {
        let bus = ModelSelectionBus::default();
        let mut sub = bus.subscribe();
        drop(bus);
        assert_eq!(sub.next().await, None);
    }
}
