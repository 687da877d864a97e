// ============================
// chatter-backend/src/auth/mod.rs
// ============================
//! Authentication: password hashing, session tokens and the bearer extractor.

pub mod extract;
pub mod password;
pub mod token;
mod service;
mod service_impl;

pub use extract::AuthenticatedUser;
pub use password::{CredentialHasher, PasswordError};
pub use service::AuthService;
pub use service_impl::DefaultAuth;
pub use token::{Claims, TokenError, TokenIssuer, MAX_SESSION_TTL, SESSION_TTL};
