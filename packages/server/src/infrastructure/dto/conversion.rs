//! Conversion between domain events and wire frames.
//!
//! This is the serialization boundary: the single exhaustive match over
//! `RoomEvent`. Adding an event variant forces an update here, keeping the
//! wire contract closed.

use crate::domain::RoomEvent;
use crate::infrastructure::dto::websocket::{
    ActionType, ChatBroadcastMessage, ErrorMessage, EventType, MemeUpdateMessage,
    TimerUpdateMessage, UserJoinMessage, UserLeaveMessage, VoteUpdateMessage,
};

/// Serialize a broadcast event to its JSON wire frame.
pub fn encode_event(event: &RoomEvent) -> String {
    match event {
        RoomEvent::UserJoin { username } => serde_json::to_string(&UserJoinMessage {
            r#type: EventType::UserJoin,
            username: username.as_str().to_string(),
        }),
        RoomEvent::UserLeave { username } => serde_json::to_string(&UserLeaveMessage {
            r#type: EventType::UserLeave,
            username: username.as_str().to_string(),
        }),
        RoomEvent::ChatMessage {
            username,
            message,
            timestamp,
        } => serde_json::to_string(&ChatBroadcastMessage {
            r#type: EventType::ChatMessage,
            message: message.clone(),
            username: username.as_str().to_string(),
            timestamp: timestamp.clone(),
        }),
        RoomEvent::TimerUpdate { time_left } => serde_json::to_string(&TimerUpdateMessage {
            action: ActionType::Timer,
            time_left: *time_left,
        }),
        RoomEvent::VoteUpdate { vote } => serde_json::to_string(&VoteUpdateMessage {
            action: ActionType::Vote,
            vote: vote.clone(),
        }),
        RoomEvent::MemeUpdate { meme_update } => serde_json::to_string(&MemeUpdateMessage {
            action: ActionType::UpdateMeme,
            meme_update: meme_update.clone(),
        }),
    }
    .unwrap()
}

/// Serialize a sender-only error frame.
pub fn encode_error(message: &str) -> String {
    serde_json::to_string(&ErrorMessage {
        error: message.to_string(),
    })
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Username;
    use serde_json::{Value, json};

    fn parse(frame: String) -> Value {
        serde_json::from_str(&frame).unwrap()
    }

    #[test]
    fn test_user_join_wire_shape() {
        // Test: user_join frames carry the type tag and username
        // given:
        let event = RoomEvent::UserJoin {
            username: Username::new("alice".to_string()).unwrap(),
        };

        // when:
        let frame = parse(encode_event(&event));

        // then:
        assert_eq!(frame, json!({"type": "user_join", "username": "alice"}));
    }

    #[test]
    fn test_user_leave_wire_shape() {
        // Test: user_leave frames carry the type tag and username
        // given:
        let event = RoomEvent::UserLeave {
            username: Username::anonymous(),
        };

        // when:
        let frame = parse(encode_event(&event));

        // then:
        assert_eq!(frame, json!({"type": "user_leave", "username": "Anonymous"}));
    }

    #[test]
    fn test_chat_message_wire_shape_has_explicit_type_tag() {
        // Test: chat broadcasts carry the chat_message tag, symmetric with
        // the presence events
        // given:
        let event = RoomEvent::ChatMessage {
            username: Username::new("alice".to_string()).unwrap(),
            message: "gg".to_string(),
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
        };

        // when:
        let frame = parse(encode_event(&event));

        // then:
        assert_eq!(
            frame,
            json!({
                "type": "chat_message",
                "message": "gg",
                "username": "alice",
                "timestamp": "2024-01-01T00:00:00+00:00"
            })
        );
    }

    #[test]
    fn test_timer_update_wire_shape() {
        // Test: timer frames use the action tag and time_left field
        // given:
        let event = RoomEvent::TimerUpdate { time_left: 29 };

        // when:
        let frame = parse(encode_event(&event));

        // then:
        assert_eq!(frame, json!({"action": "timer", "time_left": 29}));
    }

    #[test]
    fn test_vote_update_wire_shape_passes_payload_through() {
        // Test: vote frames relay the payload unchanged
        // given:
        let event = RoomEvent::VoteUpdate {
            vote: json!({"meme_id": 7, "score": 3}),
        };

        // when:
        let frame = parse(encode_event(&event));

        // then:
        assert_eq!(
            frame,
            json!({"action": "vote", "vote": {"meme_id": 7, "score": 3}})
        );
    }

    #[test]
    fn test_meme_update_wire_shape_passes_payload_through() {
        // Test: meme frames use the update_meme action tag
        // given:
        let event = RoomEvent::MemeUpdate {
            meme_update: json!({"caption": "such wow"}),
        };

        // when:
        let frame = parse(encode_event(&event));

        // then:
        assert_eq!(
            frame,
            json!({"action": "update_meme", "meme_update": {"caption": "such wow"}})
        );
    }

    #[test]
    fn test_error_frame_wire_shape() {
        // Test: error frames carry a single error field
        // given / when:
        let frame = parse(encode_error("Invalid vote value"));

        // then:
        assert_eq!(frame, json!({"error": "Invalid vote value"}));
    }
}
