//! Redis pub/sub backplane.

use async_trait::async_trait;
use futures_util::StreamExt;
use redis::AsyncCommands;
use tokio::sync::mpsc;

use crate::domain::{Backplane, BackplaneError, Subscription};

/// Backplane over Redis PUBLISH/SUBSCRIBE.
///
/// Each subscription holds its own pub/sub connection with a forwarder task
/// draining it into the subscriber's channel; publishes go through a
/// multiplexed connection. Redis preserves per-channel message order, which
/// carries the router's per-group ordering guarantee across processes.
pub struct RedisBackplane {
    client: redis::Client,
}

impl RedisBackplane {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    /// Open a client for the given Redis URL (e.g. `redis://127.0.0.1/`).
    pub fn connect(url: &str) -> Result<Self, BackplaneError> {
        let client = redis::Client::open(url)
            .map_err(|e| BackplaneError::SubscribeFailed(e.to_string()))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Backplane for RedisBackplane {
    async fn publish(&self, topic: &str, payload: String) -> Result<(), BackplaneError> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| BackplaneError::PublishFailed(e.to_string()))?;
        conn.publish::<_, _, ()>(topic, payload)
            .await
            .map_err(|e| BackplaneError::PublishFailed(e.to_string()))?;
        Ok(())
    }

    async fn subscribe(&self, topic: &str) -> Result<Subscription, BackplaneError> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| BackplaneError::SubscribeFailed(e.to_string()))?;
        // SUBSCRIBE is acknowledged by the server before we return, so the
        // subscription observes every later publish.
        pubsub
            .subscribe(topic)
            .await
            .map_err(|e| BackplaneError::SubscribeFailed(e.to_string()))?;

        let (tx, rx) = mpsc::unbounded_channel();
        let topic = topic.to_string();
        tokio::spawn(async move {
            let mut messages = pubsub.on_message();
            while let Some(message) = messages.next().await {
                let payload: String = match message.get_payload() {
                    Ok(payload) => payload,
                    Err(e) => {
                        tracing::warn!("Discarding non-UTF-8 payload on '{}': {}", topic, e);
                        continue;
                    }
                };
                if tx.send(payload).is_err() {
                    // Subscriber went away; dropping the pub/sub connection
                    // unsubscribes.
                    break;
                }
            }
            tracing::debug!("Redis subscription for '{}' closed", topic);
        });

        Ok(Subscription::new(rx))
    }
}
