//! UseCase: meme update relay.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{BroadcastRouter, ChannelKind, GroupName, RoomEvent, RoomName, RouterError};

pub struct RelayMemeUseCase {
    router: Arc<dyn BroadcastRouter>,
}

impl RelayMemeUseCase {
    pub fn new(router: Arc<dyn BroadcastRouter>) -> Self {
        Self { router }
    }

    /// Broadcast a meme update payload, unchanged, to the room's meme group.
    pub async fn execute(&self, room: &RoomName, meme_update: Value) -> Result<(), RouterError> {
        let group = GroupName::new(ChannelKind::Meme, room);
        self.router
            .broadcast(&group, &RoomEvent::MemeUpdate { meme_update })
            .await
    }
}
