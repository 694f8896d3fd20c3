//! Identity provider interface and the authentication policy.

use async_trait::async_trait;

use super::value_object::Username;

/// External collaborator answering one question: is the caller presenting
/// this token authenticated, and if so under what display name.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn identify(&self, token: &str) -> Option<Username>;
}

/// How the main sub-channel treats callers without a verified identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Unidentified callers join as the `"Anonymous"` sentinel.
    AllowAnonymous,
    /// Unidentified callers get a structured error frame over the accepted
    /// handshake and are never joined to the group; no presence event fires.
    Required,
}
