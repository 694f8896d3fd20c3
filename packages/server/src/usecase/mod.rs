//! Use case layer: one entry point per operation the connection handlers
//! perform.

mod connect_session;
mod disconnect_session;
mod error;
mod relay_meme;
mod relay_vote;
mod send_chat;
mod start_countdown;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{ConnectError, CountdownError};
pub use relay_meme::RelayMemeUseCase;
pub use relay_vote::RelayVoteUseCase;
pub use send_chat::SendChatUseCase;
pub use start_countdown::StartCountdownUseCase;
