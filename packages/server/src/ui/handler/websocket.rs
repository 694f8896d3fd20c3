//! WebSocket connection handlers.
//!
//! One connection per `(room, sub-channel)` pair. The four sub-channels
//! share a single lifecycle (`handle_socket`); only inbound-frame handling
//! is specialized per kind.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    domain::{ChannelKind, RoomName, SessionId, SessionSender, Username},
    infrastructure::dto::{
        encode_error,
        websocket::{ChatFrame, MemeFrame, TimerFrame, VoteFrame},
    },
    ui::state::AppState,
    usecase::ConnectError,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub token: Option<String>,
}

pub async fn main_channel_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    channel_handler(ws, state, room_name, ChannelKind::Main, query.token)
}

pub async fn timer_channel_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    channel_handler(ws, state, room_name, ChannelKind::Timer, query.token)
}

pub async fn vote_channel_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    channel_handler(ws, state, room_name, ChannelKind::Vote, query.token)
}

pub async fn meme_channel_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    channel_handler(ws, state, room_name, ChannelKind::Meme, query.token)
}

fn channel_handler(
    ws: WebSocketUpgrade,
    state: Arc<AppState>,
    room_name: String,
    kind: ChannelKind,
    token: Option<String>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> RoomName (Domain Model); a malformed path parameter
    // rejects the handshake itself.
    let room = match RoomName::new(room_name) {
        Ok(room) => room,
        Err(e) => {
            tracing::warn!("Rejecting connection: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room, kind, token)))
}

/// Spawns a task that receives frames from the rx channel and pushes them to
/// the WebSocket sender.
///
/// This is the outbound half of the session: frames fanned out by the group
/// registry (via the session's channel) are written to this client's
/// transport.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    room: RoomName,
    kind: ChannelKind,
    token: Option<String>,
) {
    let (mut sender, mut receiver) = socket.split();
    let session_id = SessionId::generate();

    // Create the channel this session receives its outbound frames on. A
    // clone is kept for unicasting error frames back to this session only.
    let (tx, rx) = mpsc::unbounded_channel();
    let reply = tx.clone();

    let username = match state
        .connect_session_usecase
        .execute(session_id.clone(), &room, kind, token.as_deref(), tx)
        .await
    {
        Ok(username) => username,
        Err(ConnectError::Unauthenticated) => {
            // The handshake stays accepted: the caller gets a structured
            // error frame over the open connection instead of a bare
            // rejection, but is never joined and no presence fires.
            tracing::warn!(
                "Unauthenticated session '{}' on room '{}' not joined",
                session_id,
                room
            );
            let _ = sender
                .send(Message::Text(encode_error("Authentication required").into()))
                .await;
            return;
        }
        Err(e) => {
            tracing::error!("Failed to join session '{}' to '{}': {}", session_id, room, e);
            return;
        }
    };

    tracing::info!(
        "Session '{}' joined {}_{} as '{}'",
        session_id,
        kind,
        room,
        username
    );

    let state_clone = state.clone();
    let room_clone = room.clone();
    let username_clone = username.clone();
    let session_id_clone = session_id.clone();

    // Task receiving frames from this client
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on '{}': {}", session_id_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_frame(
                        &state_clone,
                        &room_clone,
                        kind,
                        &username_clone,
                        &reply,
                        &text,
                    )
                    .await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_id_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Task pushing group fan-out to this client
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_session_usecase
        .execute(&session_id, &room, kind, &username)
        .await;
    tracing::info!("Session '{}' left {}_{}", session_id, kind, room);
}

/// Dispatch one inbound text frame according to the sub-channel.
///
/// Frames that fail to parse, and parseable frames missing their required
/// field, produce an error frame to the sender only; the session stays open
/// either way. The one exception is the chat sub-channel, where an absent
/// message is silently ignored.
async fn handle_frame(
    state: &Arc<AppState>,
    room: &RoomName,
    kind: ChannelKind,
    username: &Username,
    reply: &SessionSender,
    text: &str,
) {
    match kind {
        ChannelKind::Main => {
            let frame = match serde_json::from_str::<ChatFrame>(text) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("Failed to parse chat frame: {}", e);
                    let _ = reply.send(encode_error("Invalid message format"));
                    return;
                }
            };
            let Some(message) = frame.message.filter(|m| !m.is_empty()) else {
                // Absent or empty message: no error, no broadcast.
                return;
            };
            if let Err(e) = state
                .send_chat_usecase
                .execute(room, username, message)
                .await
            {
                tracing::warn!("Failed to broadcast chat message: {}", e);
            }
        }
        ChannelKind::Timer => {
            let frame = match serde_json::from_str::<TimerFrame>(text) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("Failed to parse timer frame: {}", e);
                    let _ = reply.send(encode_error("Invalid message format"));
                    return;
                }
            };
            match frame.seconds {
                Some(seconds) if seconds > 0 => {
                    if let Err(e) = state
                        .start_countdown_usecase
                        .execute(room, seconds as u64)
                        .await
                    {
                        tracing::warn!("Failed to start countdown: {}", e);
                        let _ = reply.send(encode_error("Invalid timer value"));
                    }
                }
                _ => {
                    let _ = reply.send(encode_error("Invalid timer value"));
                }
            }
        }
        ChannelKind::Vote => {
            let frame = match serde_json::from_str::<VoteFrame>(text) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("Failed to parse vote frame: {}", e);
                    let _ = reply.send(encode_error("Invalid message format"));
                    return;
                }
            };
            match frame.vote {
                Some(vote) => {
                    if let Err(e) = state.relay_vote_usecase.execute(room, vote).await {
                        tracing::warn!("Failed to relay vote: {}", e);
                    }
                }
                None => {
                    let _ = reply.send(encode_error("Invalid vote value"));
                }
            }
        }
        ChannelKind::Meme => {
            let frame = match serde_json::from_str::<MemeFrame>(text) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("Failed to parse meme frame: {}", e);
                    let _ = reply.send(encode_error("Invalid message format"));
                    return;
                }
            };
            match frame.meme_update {
                Some(meme_update) => {
                    if let Err(e) = state.relay_meme_usecase.execute(room, meme_update).await {
                        tracing::warn!("Failed to relay meme update: {}", e);
                    }
                }
                None => {
                    let _ = reply.send(encode_error("Invalid meme update"));
                }
            }
        }
    }
}
