//! Broadcast router interface.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::RouterError;
use super::event::RoomEvent;
use super::value_object::{GroupName, SessionId};

/// Channel over which a session receives its outbound frames.
pub type SessionSender = mpsc::UnboundedSender<String>;

/// Message-dispatch contract between connection sessions and the group
/// registry: membership management plus fan-out of events to every member of
/// a named group, including the sender.
#[async_trait]
pub trait BroadcastRouter: Send + Sync {
    /// Add `session` to `group`. Idempotent: a duplicate join is a no-op.
    async fn join(
        &self,
        group: &GroupName,
        session: SessionId,
        sender: SessionSender,
    ) -> Result<(), RouterError>;

    /// Remove `session` from `group`. Idempotent: removing a non-member is a
    /// no-op.
    async fn leave(&self, group: &GroupName, session: &SessionId);

    /// Deliver a copy of `event` to every current member of `group`,
    /// including the originating session. Delivery failure to an individual
    /// member never aborts delivery to the rest.
    async fn broadcast(&self, group: &GroupName, event: &RoomEvent) -> Result<(), RouterError>;
}
