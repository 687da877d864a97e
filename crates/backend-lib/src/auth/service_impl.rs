use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use super::{AuthService, CredentialHasher, PasswordError, TokenError, TokenIssuer};
use crate::store::UserId;

/// Default [`AuthService`] backed by scrypt and HS256 session tokens
pub struct DefaultAuth {
    hasher: Arc<CredentialHasher>,
    tokens: TokenIssuer,
}

impl DefaultAuth {
    pub fn new(hasher: CredentialHasher, tokens: TokenIssuer) -> Self {
        Self {
            hasher: Arc::new(hasher),
            tokens,
        }
    }
}

#[async_trait]
impl AuthService for DefaultAuth {
    async fn hash_password(&self, plain: &str) -> Result<String, PasswordError> {
        let hasher = Arc::clone(&self.hasher);
        let plain = Zeroizing::new(plain.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| PasswordError::Hashing(e.to_string()))?
    }

    async fn verify_password(&self, hash: &str, plain: &str) -> Result<(), PasswordError> {
        let hasher = Arc::clone(&self.hasher);
        let hash = hash.to_owned();
        let plain = Zeroizing::new(plain.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &plain))
            .await
            .map_err(|e| PasswordError::Hashing(e.to_string()))?
    }

    fn issue_token(&self, user_id: UserId) -> Result<String, TokenError> {
        self.tokens.issue(user_id)
    }

    fn verify_token(&self, token: &str) -> Result<UserId, TokenError> {
        self.tokens.verify(token)
    }
}
