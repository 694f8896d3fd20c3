//! Data Transfer Objects for the server's protocols.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket frame DTOs (inbound and outbound)
//! - `http`: HTTP API response DTOs
//!
//! `conversion` is the serialization boundary between domain events and the
//! wire.

pub mod conversion;
pub mod http;
pub mod websocket;

pub use conversion::{encode_error, encode_event};
