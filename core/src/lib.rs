//! # Taskstore Core
//!
//! Domain model and pure state-transition logic for the taskstore
//! architecture.
//!
//! This crate is the functional core: it knows what a [`todo::Todo`] is, how
//! the collection state evolves in response to a [`action::TodoAction`], and
//! which side effects a transition requires, but it performs no I/O itself.
//! The imperative shell lives in `taskstore-runtime`, which owns the state,
//! drives the reducer and executes the returned [`effect::Effect`]
//! descriptions against a persistence adapter.
//!
//! ## Core Concepts
//!
//! - **State**: the insertion-ordered collection of todos for the active user
//! - **Action**: every possible state transition, as data
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: side-effect descriptions (persistence), not execution
//! - **Environment**: injected dependencies (`Clock`, `IdGenerator`) via traits
//!
//! ## Example
//!
//! ```
//! use taskstore_core::action::TodoAction;
//! use taskstore_core::environment::TodoEnvironment;
//! use taskstore_core::reducer::{Reducer, TodoReducer};
//! use taskstore_core::state::TodoState;
//! use taskstore_core::todo::{CreateTodoRequest, Priority, TodoId, UserId};
//!
//! let env = TodoEnvironment::system();
//! let reducer = TodoReducer::new();
//! let mut state = TodoState::for_user(UserId::new(1));
//!
//! let effects = reducer.reduce(
//!     &mut state,
//!     TodoAction::CreateTodo {
//!         id: TodoId::new(1_700_000_000_000),
//!         request: CreateTodoRequest::new("Buy milk", Priority::Low, UserId::new(1)),
//!     },
//!     &env,
//! );
//!
//! assert_eq!(state.len(), 1);
//! assert!(!effects.is_empty());
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::SmallVec;

pub mod action;
pub mod effect;
pub mod environment;
pub mod reducer;
pub mod state;
pub mod todo;
