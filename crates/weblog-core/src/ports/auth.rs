//! Credential and session ports.

use async_trait::async_trait;

use crate::domain::{SessionToken, UserId};

/// Well-formed Argon2id hash (default parameters) of no known password.
///
/// Verified against when a login names an unknown user so that both failure
/// paths pay for one full verification.
pub const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$pxeDRZxhpjKFUehGJki8IQ$d8x1OggcOvnw2h2qcih8IMuHuEpGyRLH5zypI73n5XU";

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Verify a password against a stored hash.
    ///
    /// A malformed hash verifies as `false`.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Server-side session storage mapping opaque tokens to users.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Open a session for a user and return its token.
    async fn create(&self, user_id: UserId) -> SessionToken;

    /// Resolve a token to its user, `None` if unknown or expired.
    async fn resolve(&self, token: &SessionToken) -> Option<UserId>;

    /// Forget a token. Unknown tokens are ignored.
    async fn revoke(&self, token: &SessionToken);
}

/// Credential errors.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Hashing error: {0}")]
    Hashing(String),
}
