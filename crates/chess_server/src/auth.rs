use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("unknown auth token")]
    UnknownToken,
}

/// Resolves an opaque auth token to an account name. The server never sees
/// credentials, only tokens minted elsewhere.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn resolve_identity(&self, token: &str) -> Result<String, AuthError>;
}

/// Fixed token table from configuration. Stands in for a real identity
/// service behind the same trait.
pub struct StaticTokenAuth {
    tokens: HashMap<String, String>,
}

impl StaticTokenAuth {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        StaticTokenAuth { tokens }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn resolve_identity(&self, token: &str) -> Result<String, AuthError> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::UnknownToken)
    }
}
