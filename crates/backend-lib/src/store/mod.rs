// ============================
// chatter-backend/src/store/mod.rs
// ============================
//! User record store.
//!
//! Email uniqueness is enforced inside the store as an atomic
//! insert-if-absent, so concurrent registrations with the same address
//! cannot both succeed. Emails are compared ASCII case-insensitively.
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chatter_common::UserView;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

mod collection;
pub mod flat_file;
pub mod memory;

pub use flat_file::FlatFileUserStore;
pub use memory::MemoryUserStore;

/// Store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("user with this email already exists")]
    DuplicateEmail,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt user document: {0}")]
    Corrupt(String),

    #[error("store task failed: {0}")]
    Task(String),
}

/// Store-generated user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// A fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A persisted user document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Public view without the password hash
    pub fn view(&self) -> UserView {
        UserView {
            id: self.id.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            created_at: self.created_at,
        }
    }
}

/// A user about to be inserted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    fn into_record(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// A point update to a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserChange {
    Name(String),
    Email(String),
    PasswordHash(String),
}

/// 1-based page of users
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(number: u32, size: u32) -> Self {
        Self { number, size }
    }

    /// Records to skip: `(number - 1) * size`
    pub fn skip(&self) -> usize {
        (self.number.saturating_sub(1) as usize).saturating_mul(self.size as usize)
    }
}

/// Persistent collection of user records keyed by [`UserId`]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user unless its email is already taken
    async fn create(&self, user: NewUser) -> Result<UserId, StoreError>;

    /// Look up a user by email. Absence is `Ok(None)`.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Look up a user by id. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;

    /// One page of users ordered by creation time, then id
    async fn list_page(&self, page: PageRequest) -> Result<Vec<UserRecord>, StoreError>;

    /// Apply a point update. Updating a missing id is not an error.
    async fn update(&self, id: UserId, change: UserChange) -> Result<(), StoreError>;

    /// Remove a user. Deleting a missing id is not an error.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;

    async fn update_email(&self, id: UserId, email: String) -> Result<(), StoreError> {
        self.update(id, UserChange::Email(email)).await
    }

    async fn update_name(&self, id: UserId, name: String) -> Result<(), StoreError> {
        self.update(id, UserChange::Name(name)).await
    }

    async fn update_password(&self, id: UserId, password_hash: String) -> Result<(), StoreError> {
        self.update(id, UserChange::PasswordHash(password_hash)).await
    }
}
