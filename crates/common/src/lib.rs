// ================
// common/src/lib.rs
// ================
//! Wire types shared between the chatter account server and its clients.
//!
//! Every HTTP response is wrapped in an [`ApiResponse`] envelope:
//! `{ "message": ..., "data": ..., "status_code": ..., "error": ... }`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to every newly registered user
pub const DEFAULT_ROLE: &str = "USER";

/// Response envelope used by every endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    /// Human readable summary
    pub message: String,
    /// Payload; `null` on errors
    pub data: Option<T>,
    /// HTTP status code mirrored into the body
    pub status_code: u16,
    /// Error detail, only present on failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope carrying `data`
    pub fn success(message: impl Into<String>, status_code: u16, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status_code,
            error: None,
        }
    }

    /// Successful envelope without a payload
    pub fn empty(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            data: None,
            status_code,
            error: None,
        }
    }

    /// Failure envelope; `data` is always `null`
    pub fn failure(message: impl Into<String>, status_code: u16, error: Option<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            status_code,
            error,
        }
    }
}

/// Body of `POST /user/register`
///
/// Missing fields deserialize as empty strings so validation can report
/// which one is required.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Data returned by a successful registration
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RegisterResponse {
    pub inserted_id: String,
}

/// Body of `POST /user/login`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Data returned by a successful login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
}

/// Body of `PATCH /user/profile`; absent fields are left untouched
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Public view of a user record. Never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}
