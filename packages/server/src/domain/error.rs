//! Error types for the domain layer and its interfaces.

use thiserror::Error;

/// Validation failures on value objects.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("invalid room name: '{0}'")]
    InvalidRoomName(String),

    #[error("invalid username")]
    InvalidUsername,
}

/// Failures of the pub/sub backplane.
#[derive(Debug, Error)]
pub enum BackplaneError {
    #[error("publish failed: {0}")]
    PublishFailed(String),

    #[error("subscribe failed: {0}")]
    SubscribeFailed(String),
}

/// Failures of the shared key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failures of the broadcast router.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("backplane error: {0}")]
    Backplane(#[from] BackplaneError),
}
