//! Static token identity provider.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::{IdentityProvider, Username};

/// Identity provider backed by a fixed token → display-name table.
///
/// Stands in for the credential-issuing service, which is an external
/// collaborator of this system: the server only ever asks "who is this
/// token", never mints or verifies credentials itself.
pub struct StaticTokenIdentity {
    tokens: HashMap<String, Username>,
}

impl StaticTokenIdentity {
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>, username: Username) -> Self {
        self.tokens.insert(token.into(), username);
        self
    }
}

impl Default for StaticTokenIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentity {
    async fn identify(&self, token: &str) -> Option<Username> {
        self.tokens.get(token).cloned()
    }
}
