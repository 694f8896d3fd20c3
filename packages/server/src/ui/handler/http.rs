//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{ChannelKind, GroupName, RoomName},
    infrastructure::dto::http::TimerStateDto,
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Read a room's countdown state from the shared store.
///
/// Any process can answer this, not just the one driving the countdown; an
/// absent key means no countdown is active and reads back as `null`.
pub async fn get_timer_state(
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Result<Json<TimerStateDto>, StatusCode> {
    let room = RoomName::new(room_name).map_err(|_| StatusCode::BAD_REQUEST)?;
    let group = GroupName::new(ChannelKind::Timer, &room);

    match state.store.get(&group.countdown_key()).await {
        Ok(value) => {
            let time_left = value.and_then(|v| v.parse::<u64>().ok());
            Ok(Json(TimerStateDto { time_left }))
        }
        Err(e) => {
            tracing::error!("Failed to read countdown state for '{}': {}", group, e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
