//! Process-local user store.
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::collection::UserCollection;
use super::{NewUser, PageRequest, StoreError, UserChange, UserId, UserRecord, UserStore};

/// In-memory [`UserStore`]. Cloning shares the same collection.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<UserCollection>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<UserId, StoreError> {
        let mut users = self.users.write();
        let record = users.prepare_insert(user)?;
        let id = record.id;
        users.upsert(record);
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().find_by_email(email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().get(id).cloned())
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.read().page(page))
    }

    async fn update(&self, id: UserId, change: UserChange) -> Result<(), StoreError> {
        let mut users = self.users.write();
        if let Some(updated) = users.prepare_update(id, change)? {
            users.upsert(updated);
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        self.users.write().remove(id);
        Ok(())
    }
}
