//! UseCase: chat message broadcast.

use std::sync::Arc;

use royale_shared::time::{Clock, timestamp_to_rfc3339};

use crate::domain::{
    BroadcastRouter, ChannelKind, GroupName, RoomEvent, RoomName, RouterError, Username,
};

pub struct SendChatUseCase {
    router: Arc<dyn BroadcastRouter>,
    clock: Arc<dyn Clock>,
}

impl SendChatUseCase {
    pub fn new(router: Arc<dyn BroadcastRouter>, clock: Arc<dyn Clock>) -> Self {
        Self { router, clock }
    }

    /// Broadcast a chat message to the room's main group, stamped with the
    /// sender identity and the server's current time.
    pub async fn execute(
        &self,
        room: &RoomName,
        username: &Username,
        message: String,
    ) -> Result<(), RouterError> {
        let group = GroupName::new(ChannelKind::Main, room);
        let event = RoomEvent::ChatMessage {
            username: username.clone(),
            message,
            timestamp: timestamp_to_rfc3339(self.clock.now_utc_millis()),
        };
        self.router.broadcast(&group, &event).await
    }
}
