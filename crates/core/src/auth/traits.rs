use async_trait::async_trait;

use super::{AuthError, BearerToken, Principal};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Resolves bearer tokens to principals.
///
/// Token issuance and identity providers live outside this service; the
/// server only needs to know who a token belongs to and what role they hold.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Returns `None` for an unknown token.
    async fn verify(&self, token: &BearerToken) -> Result<Option<Principal>>;
}
