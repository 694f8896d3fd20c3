//! Shared application state.

use std::sync::Arc;

use crate::domain::KeyValueStore;
use crate::usecase::{
    ConnectSessionUseCase, DisconnectSessionUseCase, RelayMemeUseCase, RelayVoteUseCase,
    SendChatUseCase, StartCountdownUseCase,
};

/// Shared application state: the use cases the handlers dispatch to, plus
/// the store handle the timer read-back endpoint queries directly.
pub struct AppState {
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    pub send_chat_usecase: Arc<SendChatUseCase>,
    pub start_countdown_usecase: Arc<StartCountdownUseCase>,
    pub relay_vote_usecase: Arc<RelayVoteUseCase>,
    pub relay_meme_usecase: Arc<RelayMemeUseCase>,
    pub store: Arc<dyn KeyValueStore>,
}
