//! # Taskstore Runtime
//!
//! The imperative shell around the functional core: [`TodoStore`] owns the
//! collection state, applies the reducer atomically and executes the
//! persistence effects it returns.
//!
//! ## Core Components
//!
//! - **`TodoStore`**: the store runtime exposing the async CRUD API and the
//!   synchronous derived reads
//! - **`StoreConfig`**: configuration (simulated request latency)
//! - **`error::StorageFailure`**: reports published when a persistence
//!   effect fails
//!
//! ## Contract
//!
//! No store operation returns an error. Lookups resolve to `Option`,
//! deletes to a `bool`, and persistence failures degrade to a log line plus
//! a report on the failure channel; the in-memory state stays intact and
//! remains the source of truth.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskstore_core::environment::TodoEnvironment;
//! use taskstore_core::todo::{CreateTodoRequest, Priority, UserId};
//! use taskstore_runtime::TodoStore;
//! use taskstore_storage::InMemoryStore;
//!
//! # async fn demo() {
//! let store = TodoStore::new(Arc::new(InMemoryStore::new()), TodoEnvironment::system());
//! store.init().await;
//!
//! let todo = store
//!     .create_todo(CreateTodoRequest::new("Buy milk", Priority::Low, UserId::new(1)))
//!     .await;
//! assert_eq!(store.stats().total, 1);
//! # let _ = todo;
//! # }
//! ```

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

use taskstore_core::action::TodoAction;
use taskstore_core::effect::Effect;
use taskstore_core::environment::TodoEnvironment;
use taskstore_core::reducer::{Effects, Reducer, TodoReducer};
use taskstore_core::state::{TodoState, TodoStats};
use taskstore_core::todo::{CreateTodoRequest, Priority, Todo, TodoId, TodoPatch, TodoStatus, UserId};
use taskstore_storage::TodoStorage;

use crate::error::StorageFailure;

/// Error types for the store runtime
pub mod error {
    use taskstore_core::todo::UserId;
    use thiserror::Error;

    /// Report of a failed persistence attempt.
    ///
    /// Published on the store's failure channel instead of failing the
    /// operation: the in-memory collection stays authoritative, the mirror
    /// is best-effort.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    #[error("{operation} failed for user {user}: {message}")]
    pub struct StorageFailure {
        /// The persistence operation that failed
        pub operation: &'static str,
        /// The user scope the write was for
        pub user: UserId,
        /// The underlying storage error, rendered
        pub message: String,
    }
}

/// The user scope loaded when no current-user entry was ever persisted.
pub const DEFAULT_USER: UserId = UserId::new(1);

/// Configuration for [`TodoStore`].
///
/// The simulated latency preserves the asynchronous contract of the API the
/// store stands in for; it is not functional and tests run with
/// [`StoreConfig::instant`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use taskstore_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_simulated_latency(Duration::from_millis(10));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Artificial delay applied before every async operation
    pub simulated_latency: Duration,
}

impl StoreConfig {
    /// Configuration without any simulated latency
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            simulated_latency: Duration::ZERO,
        }
    }

    /// Set the simulated request latency
    #[must_use]
    pub const fn with_simulated_latency(mut self, latency: Duration) -> Self {
        self.simulated_latency = latency;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            simulated_latency: Duration::from_millis(100),
        }
    }
}

/// The store runtime: single authoritative in-memory collection for the
/// currently selected user, with derived aggregates recomputed on read and
/// a best-effort mirror to persistent storage.
///
/// Mutations apply under a write lock with no await point inside the
/// critical section, so every transition is atomic with respect to other
/// store operations; concurrent async callers interleave only around their
/// simulated latency. The store is the sole writer of both the in-memory
/// collection and the persisted mirror.
pub struct TodoStore {
    state: RwLock<TodoState>,
    reducer: TodoReducer,
    environment: TodoEnvironment,
    storage: Arc<dyn TodoStorage>,
    config: StoreConfig,
    failures: watch::Sender<Option<StorageFailure>>,
}

impl TodoStore {
    /// Creates a store with the default configuration.
    ///
    /// The store starts empty and scoped to [`DEFAULT_USER`]; call
    /// [`TodoStore::init`] to rehydrate from storage.
    #[must_use]
    pub fn new(storage: Arc<dyn TodoStorage>, environment: TodoEnvironment) -> Self {
        Self::with_config(storage, environment, StoreConfig::default())
    }

    /// Creates a store with an explicit configuration
    #[must_use]
    pub fn with_config(
        storage: Arc<dyn TodoStorage>,
        environment: TodoEnvironment,
        config: StoreConfig,
    ) -> Self {
        let (failures, _) = watch::channel(None);
        Self {
            state: RwLock::new(TodoState::for_user(DEFAULT_USER)),
            reducer: TodoReducer::new(),
            environment,
            storage,
            config,
            failures,
        }
    }

    /// Rehydrates the store from persistent storage: the persisted
    /// current-user id (defaulting to [`DEFAULT_USER`]) and that user's
    /// collection.
    ///
    /// Missing or unreadable data loads as an empty collection; this
    /// operation cannot fail.
    pub async fn init(&self) {
        let user = self
            .storage
            .load_current_user()
            .await
            .unwrap_or(DEFAULT_USER);
        let todos = self.storage.load_todos(user).await;
        debug!(%user, count = todos.len(), "store initialized");

        let mut state = self.write_state();
        *state = TodoState { todos, current_user: user };
    }

    /// Switches the active user scope.
    ///
    /// Discards the visible collection, reloads the new user's persisted
    /// slice (empty when none exists) and persists the new current-user id.
    /// Cannot fail.
    pub async fn set_current_user(&self, user: UserId) {
        let todos = self.storage.load_todos(user).await;
        self.dispatch(TodoAction::SwitchUser { user, todos }, |_, _| ())
            .await;
    }

    /// The active user scope
    #[must_use]
    pub fn current_user(&self) -> UserId {
        self.read_state().current_user
    }

    /// Full current collection, in insertion order. Never fails.
    pub async fn get_all_todos(&self) -> Vec<Todo> {
        self.simulate_latency().await;
        self.read_state().todos.clone()
    }

    /// Looks up a single record; `None` when the id does not exist.
    pub async fn get_todo_by_id(&self, id: TodoId) -> Option<Todo> {
        self.simulate_latency().await;
        self.read_state().get(id).cloned()
    }

    /// Creates a record from the request and returns it.
    ///
    /// The store assigns the id, forces the initial status, stamps both
    /// timestamps from one clock reading and records the active user as the
    /// creator. No validation is applied beyond structural shape.
    pub async fn create_todo(&self, request: CreateTodoRequest) -> Todo {
        self.simulate_latency().await;
        let id = self.environment.ids.next_id();
        let created = self
            .dispatch(TodoAction::CreateTodo { id, request }, |state, _| {
                state.todos.iter().rev().find(|todo| todo.id == id).cloned()
            })
            .await;
        #[allow(clippy::unwrap_used)] // the reducer appends unconditionally
        let created = created.unwrap();
        created
    }

    /// Merges the patch into the matching record and returns the updated
    /// record, or `None` when the id does not exist.
    ///
    /// Identity fields cannot be changed; see
    /// [`taskstore_core::todo::TodoPatch`].
    pub async fn update_todo(&self, id: TodoId, patch: TodoPatch) -> Option<Todo> {
        self.simulate_latency().await;
        self.dispatch(TodoAction::UpdateTodo { id, patch }, |state, _| {
            state.get(id).cloned()
        })
        .await
    }

    /// Removes the matching record; returns whether a removal occurred.
    ///
    /// Idempotent: deleting the same id again returns `false`.
    pub async fn delete_todo(&self, id: TodoId) -> bool {
        self.simulate_latency().await;
        // A removal is exactly what makes the reducer request persistence.
        self.dispatch(TodoAction::DeleteTodo { id }, |_, effects| {
            effects.contains(&Effect::PersistTodos)
        })
        .await
    }

    /// Records with the given status, in insertion order
    #[must_use]
    pub fn todos_by_status(&self, status: TodoStatus) -> Vec<Todo> {
        self.read_state().by_status(status)
    }

    /// Records with the given priority, in insertion order
    #[must_use]
    pub fn todos_by_priority(&self, priority: Priority) -> Vec<Todo> {
        self.read_state().by_priority(priority)
    }

    /// Records with status `done`
    #[must_use]
    pub fn completed_todos(&self) -> Vec<Todo> {
        self.read_state().completed()
    }

    /// Records with status `todo`
    #[must_use]
    pub fn pending_todos(&self) -> Vec<Todo> {
        self.read_state().pending()
    }

    /// Records with status `in-progress`
    #[must_use]
    pub fn in_progress_todos(&self) -> Vec<Todo> {
        self.read_state().in_progress()
    }

    /// Records with priority `high`
    #[must_use]
    pub fn high_priority_todos(&self) -> Vec<Todo> {
        self.read_state().high_priority()
    }

    /// Aggregate summary of the current collection, recomputed on every
    /// call
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        self.read_state().stats()
    }

    /// Read access to the current state.
    ///
    /// Derived values are recomputed from the live state on every call, so
    /// they always reflect the latest mutation.
    pub fn with_state<T>(&self, f: impl FnOnce(&TodoState) -> T) -> T {
        f(&self.read_state())
    }

    /// Subscribe to persistence-failure reports.
    ///
    /// The channel carries the most recent [`StorageFailure`], or `None`
    /// while no save has failed yet.
    #[must_use]
    pub fn subscribe_storage_failures(&self) -> watch::Receiver<Option<StorageFailure>> {
        self.failures.subscribe()
    }

    /// Applies an action atomically and reads a result from the mutated
    /// state and the returned effects within the same critical section,
    /// then executes the effects.
    async fn dispatch<T>(
        &self,
        action: TodoAction,
        read: impl FnOnce(&TodoState, &Effects) -> T,
    ) -> T {
        let (value, effects) = {
            let mut state = self.write_state();
            let effects = self.reducer.reduce(&mut state, action, &self.environment);
            (read(&state, &effects), effects)
        };
        self.run_effects(effects).await;
        value
    }

    /// Executes effect descriptions against the storage adapter.
    ///
    /// Failures are logged and published on the failure channel; they never
    /// propagate to the caller.
    async fn run_effects(&self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::None => {}
                Effect::PersistTodos => {
                    let (user, todos) = {
                        let state = self.read_state();
                        (state.current_user, state.todos.clone())
                    };
                    if let Err(error) = self.storage.save_todos(user, todos).await {
                        self.report_failure("save_todos", user, &error.to_string());
                    }
                }
                Effect::PersistCurrentUser(user) => {
                    if let Err(error) = self.storage.save_current_user(user).await {
                        self.report_failure("save_current_user", user, &error.to_string());
                    }
                }
            }
        }
    }

    fn report_failure(&self, operation: &'static str, user: UserId, message: &str) {
        warn!(operation, %user, message, "persistence failed, in-memory state unaffected");
        self.failures.send_replace(Some(StorageFailure {
            operation,
            user,
            message: message.to_string(),
        }));
    }

    async fn simulate_latency(&self) {
        if !self.config.simulated_latency.is_zero() {
            tokio::time::sleep(self.config.simulated_latency).await;
        }
    }

    #[allow(clippy::unwrap_used)] // lock poison is unrecoverable
    fn read_state(&self) -> RwLockReadGuard<'_, TodoState> {
        self.state.read().unwrap()
    }

    #[allow(clippy::unwrap_used)] // lock poison is unrecoverable
    fn write_state(&self) -> RwLockWriteGuard<'_, TodoState> {
        self.state.write().unwrap()
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("current_user", &self.current_user())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
