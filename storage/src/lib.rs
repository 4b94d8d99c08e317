//! Persistence adapters for the taskstore architecture.
//!
//! This crate defines the durability boundary: [`TodoStorage`], a key-value
//! mirror of a user's todo collection, plus the two shipped backends:
//! [`JsonFileStore`] for durable on-disk storage and [`InMemoryStore`] for
//! tests and demos.
//!
//! # Design
//!
//! The adapter is deliberately minimal. One key per user holds that user's
//! full collection as a serialized JSON array; one extra key holds the
//! currently selected user id as plain text. The in-memory collection held
//! by the store runtime is always the source of truth for reads; the
//! persisted copy is a best-effort mirror, which shapes the error contract:
//!
//! - loads never fail toward the caller: an absent key or a malformed
//!   payload yields an empty collection (logged, not propagated);
//! - saves report [`StorageError`] so the runtime can log and surface the
//!   failure without aborting the in-flight mutation.
//!
//! # Dyn Compatibility
//!
//! The trait uses explicit `Pin<Box<dyn Future>>` returns instead of
//! `async fn` so the runtime can hold an `Arc<dyn TodoStorage>`.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use taskstore_core::todo::{Todo, UserId};

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

/// The key under which the currently selected user id is stored.
pub const CURRENT_USER_KEY: &str = "current_user";

/// Storage key for a user's todo collection.
///
/// One key per user isolates the collections from each other.
#[must_use]
pub fn todos_key(user: UserId) -> String {
    format!("todos_user_{user}")
}

/// Errors reported by save operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The underlying medium rejected the write (quota, permissions,
    /// missing directory, ...).
    #[error("storage I/O error: {0}")]
    Io(String),

    /// The collection could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable mirror of per-user todo collections.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the store runtime shares them
/// across async tasks behind an `Arc`.
pub trait TodoStorage: Send + Sync {
    /// Load the collection persisted for the given user.
    ///
    /// Returns an empty collection when no payload exists or the payload
    /// fails to parse; neither case is an error toward the caller, because
    /// the in-memory state is authoritative and the mirror is best-effort.
    fn load_todos(&self, user: UserId) -> Pin<Box<dyn Future<Output = Vec<Todo>> + Send + '_>>;

    /// Serialize the full collection and overwrite the user's key.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the payload cannot be serialized or
    /// written; the caller decides how to report it.
    fn save_todos(
        &self,
        user: UserId,
        todos: Vec<Todo>,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>>;

    /// Load the persisted current-user id, if one was ever saved.
    fn load_current_user(&self) -> Pin<Box<dyn Future<Output = Option<UserId>> + Send + '_>>;

    /// Persist the given id as the currently selected user.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails.
    fn save_current_user(
        &self,
        user: UserId,
    ) -> Pin<Box<dyn Future<Output = Result<(), StorageError>> + Send + '_>>;
}
