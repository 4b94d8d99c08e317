//! In-memory storage for tests and demos.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::warn;

use taskstore_core::todo::{Todo, UserId};

use crate::{CURRENT_USER_KEY, StorageError, TodoStorage, todos_key};

/// [`TodoStorage`] backend holding serialized text in a map.
///
/// Entries are stored as serialized strings, not live values, so tests
/// exercise the same serialize/deserialize path as the durable backend.
/// Saves can be made to fail on demand to exercise the runtime's failure
/// reporting.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_saves: AtomicBool,
}

impl InMemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save fail (or succeed again); failure
    /// injection for tests
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Returns the raw serialized text stored under a key, if any
    #[must_use]
    pub fn raw_entry(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Overwrites the raw text stored under a key; corruption injection
    /// for tests
    pub fn set_raw_entry(&self, key: &str, value: impl Into<String>) {
        self.lock().insert(key.to_string(), value.into());
    }

    #[allow(clippy::unwrap_used)] // Mutex poison is unrecoverable
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap()
    }

    fn check_save(&self) -> Result<(), StorageError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            Err(StorageError::Io("injected save failure".to_string()))
        } else {
            Ok(())
        }
    }
}

impl TodoStorage for InMemoryStore {
    fn load_todos(&self, user: UserId) -> Pin<Box<dyn Future<Output = Vec<Todo>> + Send + '_>> {
        Box::pin(async move {
            let Some(payload) = self.raw_entry(&todos_key(user)) else {
                return Vec::new();
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
            self.check_save()?;
            let payload = serde_json::to_string(&todos)
                .map_err(|error| StorageError::Serialization(error.to_string()))?;
            self.lock().insert(todos_key(user), payload);
            Ok(())
        })
    }

    fn load_current_user(&self) -> Pin<Box<dyn Future<Output = Option<UserId>> + Send + '_>> {
        Box::pin(async move {
            let payload = self.raw_entry(CURRENT_USER_KEY)?;
            payload.trim().parse::<i64>().ok().map(UserId::new)
        })
    }

    fn save_current_user(
        &self,
        user: UserId,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>> {
        Box::pin(async move {
            self.check_save()?;
            self.lock()
                .insert(CURRENT_USER_KEY.to_string(), user.to_string());
            Ok(())
        })
    }
}
