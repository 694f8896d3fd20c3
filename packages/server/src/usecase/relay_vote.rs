//! UseCase: vote relay.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{BroadcastRouter, ChannelKind, GroupName, RoomEvent, RoomName, RouterError};

pub struct RelayVoteUseCase {
    router: Arc<dyn BroadcastRouter>,
}

impl RelayVoteUseCase {
    pub fn new(router: Arc<dyn BroadcastRouter>) -> Self {
        Self { router }
    }

    /// Broadcast a vote payload, unchanged, to the room's vote group.
    pub async fn execute(&self, room: &RoomName, vote: Value) -> Result<(), RouterError> {
        let group = GroupName::new(ChannelKind::Vote, room);
        self.router
            .broadcast(&group, &RoomEvent::VoteUpdate { vote })
            .await
    }
}
