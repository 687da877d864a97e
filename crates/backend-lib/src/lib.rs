// ============================
// chatter-backend/src/lib.rs
// ============================
//! Core library for the chatter user-account service.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod store;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthService, CredentialHasher, DefaultAuth, TokenIssuer};
use crate::config::{ConfigError, Settings};

pub use router::create_router;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState<S> {
    /// Password hashing and session tokens
    pub auth: Arc<dyn AuthService>,
    /// User store
    pub storage: S,
    /// Settings the server was started with
    pub settings: Arc<Settings>,
}

impl<S> AppState<S> {
    /// Build the state from validated settings
    pub fn new(storage: S, settings: &Settings) -> Result<Self, ConfigError> {
        let hasher = CredentialHasher::new(&settings.password_hash)
            .map_err(|e| ConfigError::Invalid(format!("password_hash: {e}")))?;
        let tokens = TokenIssuer::new(
            &settings.jwt_secret,
            Duration::from_secs(settings.session_ttl_secs),
        )
        .map_err(|e| ConfigError::Invalid(format!("jwt_secret: {e}")))?;

        Ok(Self::with_auth(
            storage,
            Arc::new(DefaultAuth::new(hasher, tokens)),
            settings,
        ))
    }

    /// Build the state around an existing auth service
    pub fn with_auth(storage: S, auth: Arc<dyn AuthService>, settings: &Settings) -> Self {
        Self {
            auth,
            storage,
            settings: Arc::new(settings.clone()),
        }
    }
}
