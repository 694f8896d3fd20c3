//! Value objects for rooms, sessions and broadcast groups.

use std::fmt;

use uuid::Uuid;

use super::error::DomainError;

/// Maximum accepted length for a room name path parameter.
const ROOM_NAME_MAX_LEN: usize = 64;

/// Validated room name taken from the connection path.
///
/// Accepts word characters only (letters, digits, `_`, `-`), mirroring the
/// route pattern clients are addressed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(String);

impl RoomName {
    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.is_empty() || value.len() > ROOM_NAME_MAX_LEN {
            return Err(DomainError::InvalidRoomName(value));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(DomainError::InvalidRoomName(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name of an authenticated participant, or the `"Anonymous"`
/// sentinel when no identity was presented.
///
/// The sentinel is a literal value rather than an absent field so downstream
/// UIs always have a displayable name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    pub const ANONYMOUS: &'static str = "Anonymous";

    pub fn new(value: String) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidUsername);
        }
        Ok(Self(value))
    }

    pub fn anonymous() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for one live connection, unique for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four logical topics within a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelKind {
    /// Chat and presence (the default sub-channel).
    Main,
    Timer,
    Vote,
    Meme,
}

impl ChannelKind {
    /// Group name prefix for this sub-channel.
    pub fn prefix(&self) -> &'static str {
        match self {
            ChannelKind::Main => "room",
            ChannelKind::Timer => "timer",
            ChannelKind::Vote => "vote",
            ChannelKind::Meme => "meme",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Name of one broadcast group: `{kind}_{room_name}`.
///
/// A session belongs to exactly one group, determined by the room and
/// sub-channel its connection was opened against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(kind: ChannelKind, room: &RoomName) -> Self {
        Self(format!("{}_{}", kind.prefix(), room.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key under which the group's countdown state is persisted in the
    /// shared key-value store. Only meaningful for timer groups.
    pub fn countdown_key(&self) -> String {
        format!("timer:{}", self.0)
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
