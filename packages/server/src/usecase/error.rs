//! Use case error types.

use thiserror::Error;

use crate::domain::RouterError;

/// Failures while opening a session.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The main sub-channel requires an identity under the `Required` policy
    /// and the caller presented none (or an unknown token).
    #[error("authentication required")]
    Unauthenticated,

    #[error("group join failed: {0}")]
    JoinFailed(#[from] RouterError),
}

/// Failures while starting a countdown.
#[derive(Debug, Error)]
pub enum CountdownError {
    #[error("invalid timer value")]
    InvalidDuration,
}
