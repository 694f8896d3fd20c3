//! Real-time room coordination server.
//!
//! Royale coordinates multi-party gameplay sessions: participants connect to
//! a room over one of four WebSocket sub-channels (chat/presence, timer,
//! vote, meme updates), and every event is fanned out to all members of the
//! room's group, across server processes when a Redis backplane is
//! configured.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
