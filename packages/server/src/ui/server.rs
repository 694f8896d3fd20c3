//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::KeyValueStore;
use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, RelayMemeUseCase, RelayVoteUseCase,
    SendChatUseCase, StartCountdownUseCase,
};

use super::{
    handler::{
        http::{get_timer_state, health_check},
        websocket::{
            main_channel_handler, meme_channel_handler, timer_channel_handler,
            vote_channel_handler,
        },
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Room coordination server.
///
/// Encapsulates the wired-up use cases and exposes the axum router plus a
/// blocking `run`.
pub struct Server {
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    send_chat_usecase: Arc<SendChatUseCase>,
    start_countdown_usecase: Arc<StartCountdownUseCase>,
    relay_vote_usecase: Arc<RelayVoteUseCase>,
    relay_meme_usecase: Arc<RelayMemeUseCase>,
    store: Arc<dyn KeyValueStore>,
}

impl Server {
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        send_chat_usecase: Arc<SendChatUseCase>,
        start_countdown_usecase: Arc<StartCountdownUseCase>,
        relay_vote_usecase: Arc<RelayVoteUseCase>,
        relay_meme_usecase: Arc<RelayMemeUseCase>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            connect_session_usecase,
            disconnect_session_usecase,
            send_chat_usecase,
            start_countdown_usecase,
            relay_vote_usecase,
            relay_meme_usecase,
            store,
        }
    }

    /// Build the router. Exposed separately from `run` so tests can serve it
    /// on an ephemeral port.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase.clone(),
            disconnect_session_usecase: self.disconnect_session_usecase.clone(),
            send_chat_usecase: self.send_chat_usecase.clone(),
            start_countdown_usecase: self.start_countdown_usecase.clone(),
            relay_vote_usecase: self.relay_vote_usecase.clone(),
            relay_meme_usecase: self.relay_meme_usecase.clone(),
            store: self.store.clone(),
        });

        Router::new()
            // WebSocket endpoints: one per (room, sub-channel) pair
            .route("/room/{room_name}", get(main_channel_handler))
            .route("/room/{room_name}/timer", get(timer_channel_handler))
            .route("/room/{room_name}/vote", get(vote_channel_handler))
            .route("/room/{room_name}/meme", get(meme_channel_handler))
            // HTTP endpoints
            .route("/api/health", get(health_check))
            .route("/api/rooms/{room_name}/timer", get(get_timer_state))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the room coordination server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Room coordination server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/room/{{room_name}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
