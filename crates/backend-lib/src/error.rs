// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chatter_common::ApiResponse;
use thiserror::Error;

use crate::auth::{PasswordError, TokenError};
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    /// Unknown email and wrong password are deliberately the same outcome
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required: {0}")]
    Unauthorized(String),

    #[error("User not found")]
    UserNotFound,

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Store error: {0}")]
    Store(StoreError),

    #[error("Password error: {0}")]
    Hashing(PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) | AppError::Validation(_) | AppError::InvalidQuery(_) => {
                StatusCode::BAD_REQUEST
            },
            AppError::InvalidCredentials | AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::EmailTaken => StatusCode::CONFLICT,
            AppError::Store(_) | AppError::Hashing(_) | AppError::Token(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidBody(_) => "REQ_001",
            AppError::Validation(_) => "VAL_001",
            AppError::InvalidQuery(_) => "REQ_002",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Unauthorized(_) => "AUTH_002",
            AppError::UserNotFound => "NF_001",
            AppError::EmailTaken => "USER_001",
            AppError::Store(_) => "STORE_001",
            AppError::Hashing(_) => "AUTH_003",
            AppError::Token(_) => "AUTH_004",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Envelope `message` for this error
    pub fn message(&self) -> &'static str {
        match self {
            AppError::InvalidBody(_) => "Invalid request body",
            AppError::Validation(_) => "Validation error",
            AppError::InvalidQuery(_) => "Invalid query parameter",
            AppError::InvalidCredentials => "Invalid email or password",
            AppError::Unauthorized(_) => "Authentication required",
            AppError::UserNotFound => "User not found",
            AppError::EmailTaken => "User with this email already exists",
            AppError::Store(_) => "Failed to access user store",
            AppError::Hashing(_) => "Failed to process password",
            AppError::Token(_) => "Failed to generate token",
            AppError::Internal(_) => "An internal server error occurred",
        }
    }

    /// Envelope `error` detail. Server-side failures only expose detail in
    /// debug builds.
    pub fn detail(&self) -> Option<String> {
        match self {
            AppError::InvalidBody(detail)
            | AppError::InvalidQuery(detail)
            | AppError::Unauthorized(detail) => Some(detail.clone()),
            AppError::Validation(e) => Some(e.to_string()),
            AppError::InvalidCredentials | AppError::UserNotFound | AppError::EmailTaken => None,
            AppError::Store(_) | AppError::Hashing(_) | AppError::Token(_) | AppError::Internal(_) => {
                cfg!(debug_assertions).then(|| self.to_string())
            },
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AppError::EmailTaken,
            other => AppError::Store(other),
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::Mismatch => AppError::InvalidCredentials,
            other => AppError::Hashing(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(code, error = %self, "request failed");
        } else {
            tracing::debug!(code, error = %self, "request rejected");
        }

        let body = ApiResponse::<()>::failure(self.message(), status.as_u16(), self.detail());
        (status, Json(body)).into_response()
    }
}
