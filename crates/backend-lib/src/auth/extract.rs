//! Bearer token extraction for authenticated routes.
use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use metrics::counter;

use crate::error::AppError;
use crate::metrics::TOKEN_REJECTED;
use crate::store::UserId;
use crate::AppState;

/// The user identified by a valid `Authorization: Bearer <token>` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl AuthenticatedUser {
    pub fn id(&self) -> UserId {
        self.0
    }
}

impl<S> FromRequestParts<Arc<AppState<S>>> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState<S>>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                tracing::debug!("missing or malformed Authorization header");
                AppError::Unauthorized("missing bearer token".to_string())
            })?;

        let user_id = state.auth.verify_token(token).map_err(|e| {
            counter!(TOKEN_REJECTED).increment(1);
            tracing::warn!(error = %e, "rejected session token");
            AppError::Unauthorized(e.to_string())
        })?;

        Ok(Self(user_id))
    }
}
