//! In-memory indexes shared by the store implementations.
use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use super::{NewUser, PageRequest, StoreError, UserChange, UserId, UserRecord};

/// Key used for email uniqueness and lookup
pub(crate) fn email_key(email: &str) -> String {
    email.to_ascii_lowercase()
}

/// Users indexed by id and by email, iterable in `(created_at, id)` order.
///
/// `prepare_*` methods validate a mutation and return the resulting record
/// without applying it, so callers can persist first and commit after.
#[derive(Debug, Default)]
pub(crate) struct UserCollection {
    by_id: HashMap<UserId, UserRecord>,
    by_email: HashMap<String, UserId>,
    order: BTreeSet<(DateTime<Utc>, UserId)>,
}

impl UserCollection {
    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn get(&self, id: UserId) -> Option<&UserRecord> {
        self.by_id.get(&id)
    }

    pub(crate) fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.by_email
            .get(&email_key(email))
            .and_then(|id| self.by_id.get(id))
    }

    /// Fails when `email` belongs to anyone other than `owner`
    pub(crate) fn ensure_email_available(
        &self,
        email: &str,
        owner: Option<UserId>,
    ) -> Result<(), StoreError> {
        match self.by_email.get(&email_key(email)) {
            Some(holder) if Some(*holder) != owner => Err(StoreError::DuplicateEmail),
            _ => Ok(()),
        }
    }

    pub(crate) fn prepare_insert(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        self.ensure_email_available(&user.email, None)?;

        let mut id = UserId::new();
        while self.by_id.contains_key(&id) {
            id = UserId::new();
        }
        Ok(user.into_record(id))
    }

    /// `Ok(None)` when `id` is unknown
    pub(crate) fn prepare_update(
        &self,
        id: UserId,
        change: UserChange,
    ) -> Result<Option<UserRecord>, StoreError> {
        let Some(current) = self.by_id.get(&id) else {
            return Ok(None);
        };

        let mut updated = current.clone();
        match change {
            UserChange::Name(name) => updated.name = name,
            UserChange::Email(email) => {
                self.ensure_email_available(&email, Some(id))?;
                updated.email = email;
            },
            UserChange::PasswordHash(hash) => updated.password_hash = hash,
        }
        Ok(Some(updated))
    }

    /// Insert or replace a record, keeping every index consistent
    pub(crate) fn upsert(&mut self, record: UserRecord) {
        self.remove(record.id);
        self.by_email.insert(email_key(&record.email), record.id);
        self.order.insert((record.created_at, record.id));
        self.by_id.insert(record.id, record);
    }

    pub(crate) fn remove(&mut self, id: UserId) -> Option<UserRecord> {
        let record = self.by_id.remove(&id)?;
        let key = email_key(&record.email);
        if self.by_email.get(&key) == Some(&id) {
            self.by_email.remove(&key);
        }
        self.order.remove(&(record.created_at, id));
        Some(record)
    }

    pub(crate) fn page(&self, page: PageRequest) -> Vec<UserRecord> {
        self.order
            .iter()
            .skip(page.skip())
            .take(page.size as usize)
            .filter_map(|(_, id)| self.by_id.get(id).cloned())
            .collect()
    }
}
