//! HTTP handlers.

pub mod health;
pub mod users;

use axum::{http::StatusCode, Json};
use chatter_common::ApiResponse;

/// Reply type shared by the handlers
pub type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

/// Wrap `data` in the response envelope with a matching status code
pub(crate) fn reply<T>(status: StatusCode, message: &str, data: T) -> Reply<T> {
    (status, Json(ApiResponse::success(message, status.as_u16(), data)))
}

/// Envelope without a payload
pub(crate) fn reply_empty(status: StatusCode, message: &str) -> Reply<()> {
    (status, Json(ApiResponse::empty(message, status.as_u16())))
}

/// Fallback for unknown routes
pub async fn route_not_found() -> Reply<()> {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure(
            "Route not found",
            StatusCode::NOT_FOUND.as_u16(),
            None,
        )),
    )
}
