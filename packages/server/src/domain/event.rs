//! Broadcast events fanned out to group members.

use serde_json::Value;

use super::value_object::Username;

/// The closed set of events a group can carry.
///
/// Events are transient: they exist only for the duration of fan-out and are
/// never persisted. Serialization to the wire shape happens at the DTO
/// boundary (`infrastructure::dto`), with one exhaustive match over these
/// variants.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// A participant joined the room's main sub-channel.
    UserJoin { username: Username },

    /// A participant left the room's main sub-channel.
    UserLeave { username: Username },

    /// A chat message, carrying the sender identity and a server-assigned
    /// RFC 3339 timestamp.
    ChatMessage {
        username: Username,
        message: String,
        timestamp: String,
    },

    /// One tick of a room's countdown.
    TimerUpdate { time_left: u64 },

    /// A vote payload, relayed unchanged.
    VoteUpdate { vote: Value },

    /// A meme update payload, relayed unchanged.
    MemeUpdate { meme_update: Value },
}
