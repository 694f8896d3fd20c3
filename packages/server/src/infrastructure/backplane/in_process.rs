//! Channel-based backplane for single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use crate::domain::{Backplane, BackplaneError, Subscription};

/// In-process pub/sub: one subscriber list per topic, immediate delivery.
///
/// Publishes from this process only reach subscribers in this process, so
/// this implementation is correct only for single-node deployments. The
/// Redis backplane covers the multi-process case.
pub struct InProcessBackplane {
    topics: Mutex<HashMap<String, Vec<mpsc::UnboundedSender<String>>>>,
}

impl InProcessBackplane {
    pub fn new() -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InProcessBackplane {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backplane for InProcessBackplane {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), BackplaneError> {
        let mut topics = self.topics.lock().await;
        if let Some(subscribers) = topics.get_mut(topic) {
            // Prune subscriptions whose receiver side has been dropped.
            subscribers.retain(|subscriber| subscriber.send(payload.clone()).is_ok());
            if subscribers.is_empty() {
                topics.remove(topic);
            }
        }
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription, BackplaneError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut topics = self.topics.lock().await;
        topics.entry(topic.to_string()).or_default().push(tx);
        Ok(Subscription::new(rx))
    }
}
