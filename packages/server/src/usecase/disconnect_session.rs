//! UseCase: session disconnection.
//!
//! Removes the session from its group and, for the main sub-channel,
//! publishes the `user_leave` presence event to the remaining members. The
//! leave notification is fire-and-forget: the closing transport may or may
//! not still observe it.

use std::sync::Arc;

use crate::domain::{
    BroadcastRouter, ChannelKind, GroupName, RoomEvent, RoomName, SessionId, Username,
};

pub struct DisconnectSessionUseCase {
    router: Arc<dyn BroadcastRouter>,
}

impl DisconnectSessionUseCase {
    pub fn new(router: Arc<dyn BroadcastRouter>) -> Self {
        Self { router }
    }

    /// Close a session: leave the group, then announce the departure on the
    /// main sub-channel under the same identity used at join time.
    pub async fn execute(
        &self,
        session: &SessionId,
        room: &RoomName,
        kind: ChannelKind,
        username: &Username,
    ) {
        let group = GroupName::new(kind, room);
        self.router.leave(&group, session).await;

        if kind == ChannelKind::Main {
            let event = RoomEvent::UserLeave {
                username: username.clone(),
            };
            if let Err(e) = self.router.broadcast(&group, &event).await {
                tracing::warn!("Failed to broadcast user_leave for '{}': {}", group, e);
            }
        }
    }
}
