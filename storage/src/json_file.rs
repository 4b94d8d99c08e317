//! File-backed storage: one JSON document per key under a data directory.

use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::pin::Pin;

use tracing::warn;

use taskstore_core::todo::{Todo, UserId};

use crate::{CURRENT_USER_KEY, StorageError, TodoStorage, todos_key};

/// Durable [`TodoStorage`] backend writing one file per key.
///
/// A user's collection lives in `<dir>/todos_user_<id>.json` as a JSON
/// array; the selected user id lives in `<dir>/current_user` as plain text.
/// The directory is created on first write.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at the given data directory
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn todos_path(&self, user: UserId) -> PathBuf {
        self.dir.join(format!("{}.json", todos_key(user)))
    }

    fn current_user_path(&self) -> PathBuf {
        self.dir.join(CURRENT_USER_KEY)
    }

    async fn write(&self, path: PathBuf, contents: String) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|error| StorageError::Io(error.to_string()))?;
        tokio::fs::write(&path, contents)
            .await
            .map_err(|error| StorageError::Io(error.to_string()))
    }
}

impl TodoStorage for JsonFileStore {
    fn load_todos(&self, user: UserId) -> Pin<Box<dyn Future<Output = Vec<Todo>> + Send + '_>> {
        Box::pin(async move {
            let path = self.todos_path(user);
            let payload = match tokio::fs::read_to_string(&path).await {
                Ok(payload) => payload,
                Err(error) => {
                    if error.kind() != ErrorKind::NotFound {
                        warn!(%user, %error, "failed to read todo collection, loading empty");
                    }
                    return Vec::new();
                }
            };

            match serde_json::from_str(&payload) {
                Ok(todos) => todos,
                Err(error) => {
                    warn!(%user, %error, "malformed todo payload, loading empty");
                    Vec::new()
                }
            }
        })
    }

    fn save_todos(
        &self,
        user: UserId,
        todos: Vec<Todo>,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>> {
        Box::pin(async move {
            let payload = serde_json::to_string(&todos)
                .map_err(|error| StorageError::Serialization(error.to_string()))?;
            self.write(self.todos_path(user), payload).await
        })
    }

    fn load_current_user(&self) -> Pin<Box<dyn Future<Output = Option<UserId>> + Send + '_>> {
        Box::pin(async move {
            let payload = tokio::fs::read_to_string(self.current_user_path())
                .await
                .ok()?;
            match payload.trim().parse::<i64>() {
                Ok(id) => Some(UserId::new(id)),
                Err(error) => {
                    warn!(%error, "malformed current-user entry, ignoring");
                    None
                }
            }
        })
    }

    fn save_current_user(
        &self,
        user: UserId,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>> {
        Box::pin(async move { self.write(self.current_user_path(), user.to_string()).await })
    }
}
