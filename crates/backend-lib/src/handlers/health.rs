//! Liveness probe.
use axum::http::StatusCode;

use super::{reply_empty, Reply};

/// `GET /health-check`
pub async fn health_check() -> Reply<()> {
    reply_empty(StatusCode::OK, "Server is up and running")
}
