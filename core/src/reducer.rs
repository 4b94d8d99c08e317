//! The reducer: pure state transitions for the todo collection.
//!
//! A reducer is a pure function `(State, Action, Environment) → Effects`. It
//! mutates the state in place and returns descriptions of the side effects
//! the runtime must execute, here persistence of the collection or of the
//! selected user. It never performs I/O itself.

use smallvec::{SmallVec, smallvec};

use crate::action::TodoAction;
use crate::effect::Effect;
use crate::environment::TodoEnvironment;
use crate::todo::Todo;

/// Effect list returned from a reduce step.
///
/// Transitions here produce at most two effects, so the list lives inline.
pub type Effects = SmallVec<[Effect; 2]>;

/// The Reducer trait - core abstraction for business logic
///
/// # Example
///
/// ```
/// use taskstore_core::action::TodoAction;
/// use taskstore_core::environment::TodoEnvironment;
/// use taskstore_core::reducer::{Reducer, TodoReducer};
/// use taskstore_core::state::TodoState;
/// use taskstore_core::todo::{TodoId, UserId};
///
/// let reducer = TodoReducer::new();
/// let mut state = TodoState::for_user(UserId::new(1));
/// let effects = reducer.reduce(
///     &mut state,
///     TodoAction::DeleteTodo { id: TodoId::new(1) },
///     &TodoEnvironment::system(),
/// );
/// ```
pub trait Reducer {
    /// The state type this reducer operates on
    type State;

    /// The action type this reducer processes
    type Action;

    /// The environment type with injected dependencies
    type Environment;

    /// Reduce an action into state changes and effects
    ///
    /// # Arguments
    ///
    /// - `state`: Mutable reference to current state
    /// - `action`: The action to process
    /// - `env`: Reference to injected dependencies
    ///
    /// # Returns
    ///
    /// The effects to be executed by the runtime
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects;
}

/// Reducer for the todo collection
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for TodoReducer {
    type State = crate::state::TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects {
        match action {
            TodoAction::CreateTodo { id, request } => {
                // No validation beyond structural shape: an empty title is
                // stored as-is.
                let todo = Todo::from_request(id, request, state.current_user, env.clock.now());
                state.todos.push(todo);
                smallvec![Effect::PersistTodos]
            }

            TodoAction::UpdateTodo { id, patch } => {
                let Some(todo) = state.todos.iter_mut().find(|todo| todo.id == id) else {
                    return smallvec![Effect::None];
                };
                todo.apply_patch(patch, env.clock.now());
                smallvec![Effect::PersistTodos]
            }

            TodoAction::DeleteTodo { id } => {
                let before = state.todos.len();
                state.todos.retain(|todo| todo.id != id);
                if state.todos.len() == before {
                    smallvec![Effect::None]
                } else {
                    smallvec![Effect::PersistTodos]
                }
            }

            TodoAction::SwitchUser { user, todos } => {
                state.current_user = user;
                state.todos = todos;
                smallvec![Effect::PersistCurrentUser(user)]
            }
        }
    }
}
