// ============================
// chatter-backend/src/handlers/users.rs
// ============================
//! User account handlers.
//!
//! ```text
//! POST   /user/register {"name":"Ann","email":"ann@x.com","password":"secret1"}
//! POST   /user/login    {"email":"ann@x.com","password":"secret1"}
//! GET    /user?limit=10&page=1
//! GET    /user/profile  (Authorization: Bearer <token>)
//! PATCH  /user/profile  {"name":"Annie"}
//! DELETE /user/profile
//! ```
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use chatter_common::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UpdateProfileRequest,
    UserView, DEFAULT_ROLE,
};
use chrono::Utc;
use metrics::counter;
use serde::Deserialize;
use zeroize::Zeroize;

use super::{reply, reply_empty, Reply};
use crate::auth::{AuthenticatedUser, PasswordError};
use crate::error::AppError;
use crate::metrics::{LOGIN_FAILED, LOGIN_SUCCEEDED, USER_DELETED, USER_REGISTERED, USER_UPDATED};
use crate::store::{NewUser, PageRequest, UserStore};
use crate::validation::{validate_profile_update, validate_registration};
use crate::AppState;

/// Raw pagination parameters; parsed by hand so failures use the API envelope
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl ListUsersQuery {
    /// `limit` is required and must be in `1..=max_limit`. A missing or
    /// non-numeric `page` means page 1; an explicit page below 1 is rejected.
    pub fn page_request(&self, max_limit: u32) -> Result<PageRequest, AppError> {
        let raw_limit = self
            .limit
            .as_deref()
            .ok_or_else(|| AppError::InvalidQuery("limit is required".to_string()))?;
        let limit: u32 = raw_limit.trim().parse().map_err(|_| {
            AppError::InvalidQuery(format!("limit must be a positive integer, got {raw_limit:?}"))
        })?;
        if limit == 0 || limit > max_limit {
            return Err(AppError::InvalidQuery(format!(
                "limit must be between 1 and {max_limit}"
            )));
        }

        let page = match self.page.as_deref().map(|p| p.trim().parse::<i64>()) {
            None | Some(Err(_)) => 1,
            Some(Ok(page)) => u32::try_from(page)
                .ok()
                .filter(|page| *page >= 1)
                .ok_or_else(|| {
                    AppError::InvalidQuery(format!("page must be between 1 and {}", u32::MAX))
                })?,
        };

        Ok(PageRequest::new(page, limit))
    }
}

/// `POST /user/register`
#[tracing::instrument(skip_all)]
pub async fn register<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Reply<RegisterResponse>, AppError> {
    let Json(mut req) = payload?;
    validate_registration(&req)?;

    let password_hash = state.auth.hash_password(&req.password).await?;
    req.password.zeroize();

    let user_id = state
        .storage
        .create(NewUser {
            name: req.name,
            email: req.email,
            password_hash,
            role: DEFAULT_ROLE.to_string(),
            created_at: Utc::now(),
        })
        .await?;

    counter!(USER_REGISTERED).increment(1);
    tracing::info!(%user_id, "user registered");

    Ok(reply(
        StatusCode::CREATED,
        "User inserted successfully",
        RegisterResponse {
            inserted_id: user_id.to_string(),
        },
    ))
}

/// `POST /user/login`
///
/// Unknown email and wrong password produce the same response.
#[tracing::instrument(skip_all)]
pub async fn login<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Reply<LoginResponse>, AppError> {
    let Json(req) = payload?;

    let verified = match state.storage.find_by_email(&req.email).await? {
        Some(user) => state
            .auth
            .verify_password(&user.password_hash, &req.password)
            .await
            .map(|()| user),
        None => Err(PasswordError::Mismatch),
    };

    let user = verified.map_err(|e| {
        if matches!(e, PasswordError::Mismatch) {
            counter!(LOGIN_FAILED).increment(1);
            tracing::info!("login rejected");
        }
        AppError::from(e)
    })?;

    let token = state.auth.issue_token(user.id)?;

    counter!(LOGIN_SUCCEEDED).increment(1);
    tracing::info!(user_id = %user.id, "login succeeded");

    Ok(reply(StatusCode::OK, "Login successful", LoginResponse { token }))
}

/// `GET /user?limit=&page=`
#[tracing::instrument(skip_all)]
pub async fn list_users<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    query: Result<Query<ListUsersQuery>, QueryRejection>,
) -> Result<Reply<Vec<UserView>>, AppError> {
    let Query(query) = query?;
    let page = query.page_request(state.settings.max_page_size)?;

    let users = state.storage.list_page(page).await?;
    tracing::debug!(page = page.number, limit = page.size, returned = users.len(), "listed users");

    Ok(reply(
        StatusCode::OK,
        "Retrieved users successfully",
        users.iter().map(|u| u.view()).collect(),
    ))
}

/// `GET /user/profile`
#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn profile<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthenticatedUser,
) -> Result<Reply<UserView>, AppError> {
    let record = state
        .storage
        .find_by_id(user.id())
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(reply(StatusCode::OK, "Retrieved profile successfully", record.view()))
}

/// `PATCH /user/profile`
///
/// The new password is hashed before anything is written, and the email
/// (the only change that can conflict) is applied first.
#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn update_profile<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthenticatedUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Reply<UserView>, AppError> {
    let Json(mut req) = payload?;
    validate_profile_update(&req)?;

    let id = user.id();
    if state.storage.find_by_id(id).await?.is_none() {
        return Err(AppError::UserNotFound);
    }

    let password_hash = match req.password.as_mut() {
        Some(password) => {
            let hash = state.auth.hash_password(password).await?;
            password.zeroize();
            Some(hash)
        },
        None => None,
    };

    if let Some(email) = req.email.take() {
        state.storage.update_email(id, email).await?;
    }
    if let Some(name) = req.name.take() {
        state.storage.update_name(id, name).await?;
    }
    if let Some(hash) = password_hash {
        state.storage.update_password(id, hash).await?;
    }

    let record = state
        .storage
        .find_by_id(id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    counter!(USER_UPDATED).increment(1);
    tracing::info!("profile updated");

    Ok(reply(StatusCode::OK, "Profile updated successfully", record.view()))
}

/// `DELETE /user/profile`
#[tracing::instrument(skip_all, fields(user_id = %user.id()))]
pub async fn delete_profile<S: UserStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    user: AuthenticatedUser,
) -> Result<Reply<()>, AppError> {
    state.storage.delete(user.id()).await?;

    counter!(USER_DELETED).increment(1);
    tracing::info!("user deleted");

    Ok(reply_empty(StatusCode::OK, "User deleted successfully"))
}
