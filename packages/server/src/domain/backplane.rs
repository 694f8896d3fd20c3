//! Pub/sub backplane interface.
//!
//! The broadcast router never fans out to other processes directly: it
//! publishes through this interface, and every process (the publisher
//! included) delivers to its local members from its own subscription. That
//! keeps single-node and multi-node deployments on one code path and is what
//! lets members of the same group live on different OS processes.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::BackplaneError;

/// A live subscription to one topic.
///
/// Dropping the subscription cancels it.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<String>,
}

impl Subscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<String>) -> Self {
        Self { receiver }
    }

    /// Receive the next payload published to the topic, or `None` once the
    /// backplane side has gone away.
    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }
}

/// Message bus connecting the broadcast routers of all server processes.
#[async_trait]
pub trait Backplane: Send + Sync {
    /// Publish a payload to every subscriber of `topic`, across processes.
    /// Publishing to a topic with no subscribers is not an error.
    async fn publish(&self, topic: &str, payload: String) -> Result<(), BackplaneError>;

    /// Subscribe to `topic`. The subscription is established (and will
    /// observe subsequent publishes) before this returns.
    async fn subscribe(&self, topic: &str) -> Result<Subscription, BackplaneError>;
}
