// ============================
// chatter-backend/src/store/flat_file.rs
// ============================
//! Flat-file document store: one pretty-printed JSON document per user
//! under `<root>/users/<id>.json`.
//!
//! Every document is loaded into memory on open. Mutations write the
//! document first and only then update the in-memory index, all under the
//! write lock. Each mutation runs on its own task, so a caller that is
//! dropped mid-request cannot leave a document on disk that the index
//! never saw.
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::{fs as tokio_fs, sync::RwLock};

use super::collection::UserCollection;
use super::{NewUser, PageRequest, StoreError, UserChange, UserId, UserRecord, UserStore};

const USERS_DIR: &str = "users";

/// Flat-file implementation of the [`UserStore`] trait
#[derive(Clone)]
pub struct FlatFileUserStore {
    dir: PathBuf,
    users: Arc<RwLock<UserCollection>>,
}

impl FlatFileUserStore {
    /// Open (or create) a store rooted at `root` and load every document
    pub async fn open<P: AsRef<Path>>(root: P) -> Result<Self, StoreError> {
        let dir = root.as_ref().join(USERS_DIR);
        tokio_fs::create_dir_all(&dir).await?;

        let mut users = UserCollection::default();
        let mut entries = tokio_fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }

            let content = tokio_fs::read_to_string(&path).await?;
            let record: UserRecord = serde_json::from_str(&content)
                .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?;
            let file_id = path.file_stem().and_then(|stem| stem.to_str());
            if file_id != Some(record.id.to_string().as_str()) {
                return Err(StoreError::Corrupt(format!(
                    "{}: document id {} does not match its file name",
                    path.display(),
                    record.id
                )));
            }
            if users.ensure_email_available(&record.email, None).is_err() {
                return Err(StoreError::Corrupt(format!(
                    "{}: email already used by another document",
                    path.display()
                )));
            }
            users.upsert(record);
        }

        tracing::info!(users = users.len(), path = %dir.display(), "opened flat-file user store");

        Ok(Self {
            dir,
            users: Arc::new(RwLock::new(users)),
        })
    }

    fn document_path(&self, id: UserId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Write via a temp file so readers never see a half-written document
    async fn write_document(&self, record: &UserRecord) -> Result<(), StoreError> {
        let path = self.document_path(record.id);
        let tmp = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(record)?;
        tokio_fs::write(&tmp, json).await?;
        tokio_fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Run `op` on a spawned task and wait for it. Dropping the returned
    /// future does not cancel the work.
    async fn detached<F, Fut, T>(&self, op: F) -> Result<T, StoreError>
    where
        F: FnOnce(Self) -> Fut + Send,
        Fut: Future<Output = Result<T, StoreError>> + Send + 'static,
        T: Send + 'static,
    {
        tokio::spawn(op(self.clone()))
            .await
            .map_err(|e| StoreError::Task(e.to_string()))?
    }

    async fn insert(&self, user: NewUser) -> Result<UserId, StoreError> {
        let mut users = self.users.write().await;
        let record = users.prepare_insert(user)?;
        self.write_document(&record).await?;

        let id = record.id;
        users.upsert(record);
        tracing::debug!(user_id = %id, "user document created");
        Ok(id)
    }

    async fn apply(&self, id: UserId, change: UserChange) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if let Some(updated) = users.prepare_update(id, change)? {
            self.write_document(&updated).await?;
            users.upsert(updated);
        }
        Ok(())
    }

    async fn remove(&self, id: UserId) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        match tokio_fs::remove_file(self.document_path(id)).await {
            Ok(()) => {},
            Err(e) if e.kind() == ErrorKind::NotFound => {},
            Err(e) => return Err(e.into()),
        }
        users.remove(id);
        Ok(())
    }
}

#[async_trait]
impl UserStore for FlatFileUserStore {
    async fn create(&self, user: NewUser) -> Result<UserId, StoreError> {
        self.detached(move |store| async move { store.insert(user).await })
            .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.find_by_email(email).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn list_page(&self, page: PageRequest) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.read().await.page(page))
    }

    async fn update(&self, id: UserId, change: UserChange) -> Result<(), StoreError> {
        self.detached(move |store| async move { store.apply(id, change).await })
            .await
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        self.detached(move |store| async move { store.remove(id).await })
            .await
    }
}
