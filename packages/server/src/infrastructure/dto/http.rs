//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Remaining seconds of a room's countdown as read from the shared store;
/// `null` when no countdown is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerStateDto {
    pub time_left: Option<u64>,
}
