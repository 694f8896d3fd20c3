//! UseCase: session connection.
//!
//! Resolves the caller's identity, joins the session to its group and, for
//! the main sub-channel, publishes the `user_join` presence event. The
//! joining session is already a group member when the presence event is
//! broadcast, so it receives its own echo.

use std::sync::Arc;

use crate::domain::{
    AuthPolicy, BroadcastRouter, ChannelKind, GroupName, IdentityProvider, RoomEvent, RoomName,
    SessionId, SessionSender, Username,
};

use super::error::ConnectError;

pub struct ConnectSessionUseCase {
    router: Arc<dyn BroadcastRouter>,
    identity_provider: Arc<dyn IdentityProvider>,
    auth_policy: AuthPolicy,
}

impl ConnectSessionUseCase {
    pub fn new(
        router: Arc<dyn BroadcastRouter>,
        identity_provider: Arc<dyn IdentityProvider>,
        auth_policy: AuthPolicy,
    ) -> Self {
        Self {
            router,
            identity_provider,
            auth_policy,
        }
    }

    /// Open a session on the given room and sub-channel.
    ///
    /// # Arguments
    ///
    /// * `session` - Identifier of the new connection
    /// * `room` - Validated room name from the connection path
    /// * `kind` - Sub-channel the connection was opened against
    /// * `token` - Credential presented by the caller, if any
    /// * `sender` - Channel the session receives its outbound frames on
    ///
    /// # Returns
    ///
    /// * `Ok(Username)` - The identity the session participates under
    /// * `Err(ConnectError)` - The session was not joined
    pub async fn execute(
        &self,
        session: SessionId,
        room: &RoomName,
        kind: ChannelKind,
        token: Option<&str>,
        sender: SessionSender,
    ) -> Result<Username, ConnectError> {
        let identity = match token {
            Some(token) => self.identity_provider.identify(token).await,
            None => None,
        };

        // Only the main sub-channel authenticates; the other sub-channels
        // carry no identity on the wire.
        if kind == ChannelKind::Main
            && self.auth_policy == AuthPolicy::Required
            && identity.is_none()
        {
            return Err(ConnectError::Unauthenticated);
        }

        let username = identity.unwrap_or_else(Username::anonymous);
        let group = GroupName::new(kind, room);
        self.router.join(&group, session, sender).await?;

        if kind == ChannelKind::Main {
            let event = RoomEvent::UserJoin {
                username: username.clone(),
            };
            if let Err(e) = self.router.broadcast(&group, &event).await {
                tracing::warn!("Failed to broadcast user_join for '{}': {}", group, e);
            }
        }

        Ok(username)
    }
}
