use async_trait::async_trait;

use super::{PasswordError, TokenError};
use crate::store::UserId;

/// Credential and session operations used by the HTTP handlers
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Hash a plaintext password off the async executor
    async fn hash_password(&self, plain: &str) -> Result<String, PasswordError>;

    /// Verify a plaintext password against a stored hash off the async executor
    async fn verify_password(&self, hash: &str, plain: &str) -> Result<(), PasswordError>;

    /// Issue a session token for a user
    fn issue_token(&self, user_id: UserId) -> Result<String, TokenError>;

    /// Resolve a session token to the user id it was issued for
    fn verify_token(&self, token: &str) -> Result<UserId, TokenError>;
}
