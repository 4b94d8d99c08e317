//! Actions: every state transition of the todo collection, as data.
//!
//! Ids for new records are supplied by the caller (the store generates them
//! through its [`crate::environment::IdGenerator`]), so the reducer stays a
//! deterministic function of its inputs plus the injected clock.

use serde::{Deserialize, Serialize};

use crate::todo::{CreateTodoRequest, Todo, TodoId, TodoPatch, UserId};

/// All possible inputs to the todo reducer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Create a new record from a request, under the supplied id
    CreateTodo {
        /// Id for the new record
        id: TodoId,
        /// Creation input
        request: CreateTodoRequest,
    },

    /// Merge a patch into the record with the given id; a no-op when the id
    /// does not exist
    UpdateTodo {
        /// Target record
        id: TodoId,
        /// Fields to change
        patch: TodoPatch,
    },

    /// Remove the record with the given id; a no-op when the id does not
    /// exist
    DeleteTodo {
        /// Target record
        id: TodoId,
    },

    /// Switch the active user scope, replacing the whole visible collection
    /// with that user's freshly loaded slice
    SwitchUser {
        /// The new active user
        user: UserId,
        /// That user's persisted collection (empty when none exists)
        todos: Vec<Todo>,
    },
}
