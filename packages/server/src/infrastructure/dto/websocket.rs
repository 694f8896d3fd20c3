//! WebSocket frame DTOs.
//!
//! Outbound frames keep the wire shapes clients already speak: presence and
//! chat events are tagged with a `type` field, timer/vote/meme updates with
//! an `action` field, and error frames carry a single `error` field.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminator for `type`-tagged outbound frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    UserJoin,
    UserLeave,
    ChatMessage,
}

/// Discriminator for `action`-tagged outbound frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Timer,
    Vote,
    UpdateMeme,
}

// ========================================
// Outbound frames (server → group members)
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserJoinMessage {
    pub r#type: EventType,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLeaveMessage {
    pub r#type: EventType,
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatBroadcastMessage {
    pub r#type: EventType,
    pub message: String,
    pub username: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerUpdateMessage {
    pub action: ActionType,
    pub time_left: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteUpdateMessage {
    pub action: ActionType,
    pub vote: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemeUpdateMessage {
    pub action: ActionType,
    pub meme_update: Value,
}

/// Sender-only error frame: never broadcast, always unicast back to the
/// originating session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
}

// ========================================
// Inbound frames (client → server)
// ========================================
//
// Every field is optional at the parse step; presence requirements are
// enforced per sub-channel by the frame handler so a missing field yields
// the sub-channel's own error (or, for chat, a silent ignore) instead of a
// parse failure.

#[derive(Debug, Deserialize)]
pub struct ChatFrame {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TimerFrame {
    #[serde(default)]
    pub seconds: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct VoteFrame {
    #[serde(default)]
    pub vote: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct MemeFrame {
    #[serde(default)]
    pub meme_update: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_serializes_snake_case() {
        // Test: type discriminators match the wire contract
        // given / when / then:
        assert_eq!(
            serde_json::to_string(&EventType::UserJoin).unwrap(),
            r#""user_join""#
        );
        assert_eq!(
            serde_json::to_string(&EventType::UserLeave).unwrap(),
            r#""user_leave""#
        );
        assert_eq!(
            serde_json::to_string(&EventType::ChatMessage).unwrap(),
            r#""chat_message""#
        );
    }

    #[test]
    fn test_action_type_serializes_snake_case() {
        // Test: action discriminators match the wire contract
        // given / when / then:
        assert_eq!(
            serde_json::to_string(&ActionType::Timer).unwrap(),
            r#""timer""#
        );
        assert_eq!(
            serde_json::to_string(&ActionType::Vote).unwrap(),
            r#""vote""#
        );
        assert_eq!(
            serde_json::to_string(&ActionType::UpdateMeme).unwrap(),
            r#""update_meme""#
        );
    }

    #[test]
    fn test_chat_frame_with_missing_message_parses_to_none() {
        // Test: a frame without the message field still parses
        // given:
        let frame: ChatFrame = serde_json::from_str("{}").unwrap();

        // then:
        assert!(frame.message.is_none());
    }

    #[test]
    fn test_vote_frame_with_null_vote_parses_to_none() {
        // Test: an explicit null vote is treated as absent
        // given:
        let frame: VoteFrame = serde_json::from_str(r#"{"vote": null}"#).unwrap();

        // then:
        assert!(frame.vote.is_none());
    }

    #[test]
    fn test_timer_frame_parses_integer_seconds() {
        // Test: the seconds field parses as an integer
        // given:
        let frame: TimerFrame = serde_json::from_str(r#"{"seconds": 30}"#).unwrap();

        // then:
        assert_eq!(frame.seconds, Some(30));
    }
}
