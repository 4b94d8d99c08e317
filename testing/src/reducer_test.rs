//! Ergonomic testing utilities for reducers
//!
//! This module provides a fluent API for testing reducers with readable
//! Given-When-Then syntax.

#![allow(clippy::module_name_repetitions)] // ReducerTest is the natural name

use taskstore_core::effect::Effect;
use taskstore_core::reducer::Reducer;

/// Type alias for state assertion functions
type StateAssertion<S> = Box<dyn FnOnce(&S)>;

/// Type alias for effect assertion functions
type EffectAssertion = Box<dyn FnOnce(&[Effect])>;

/// Fluent API for testing reducers with Given-When-Then syntax
///
/// # Example
///
/// ```
/// use taskstore_core::action::TodoAction;
/// use taskstore_core::environment::TodoEnvironment;
/// use taskstore_core::reducer::TodoReducer;
/// use taskstore_core::state::TodoState;
/// use taskstore_core::todo::{TodoId, UserId};
/// use taskstore_testing::{ReducerTest, assertions};
///
/// ReducerTest::new(TodoReducer::new())
///     .with_env(TodoEnvironment::system())
///     .given_state(TodoState::for_user(UserId::new(1)))
///     .when_action(TodoAction::DeleteTodo { id: TodoId::new(404) })
///     .then_state(|state| {
///         assert!(state.is_empty());
///     })
///     .then_effects(assertions::assert_no_effects)
///     .run();
/// ```
pub struct ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    reducer: R,
    environment: Option<E>,
    initial_state: Option<S>,
    action: Option<A>,
    state_assertions: Vec<StateAssertion<S>>,
    effect_assertions: Vec<EffectAssertion>,
}

impl<R, S, A, E> ReducerTest<R, S, A, E>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    /// Create a new reducer test with the given reducer
    #[must_use]
    pub const fn new(reducer: R) -> Self {
        Self {
            reducer,
            environment: None,
            initial_state: None,
            action: None,
            state_assertions: Vec::new(),
            effect_assertions: Vec::new(),
        }
    }

    /// Set the environment for the test
    #[must_use]
    pub fn with_env(mut self, env: E) -> Self {
        self.environment = Some(env);
        self
    }

    /// Set the initial state (Given)
    #[must_use]
    pub fn given_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }

    /// Set the action to test (When)
    #[must_use]
    pub fn when_action(mut self, action: A) -> Self {
        self.action = Some(action);
        self
    }

    /// Add an assertion about the resulting state (Then)
    #[must_use]
    pub fn then_state<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&S) + 'static,
    {
        self.state_assertions.push(Box::new(assertion));
        self
    }

    /// Add an assertion about the resulting effects (Then)
    #[must_use]
    pub fn then_effects<F>(mut self, assertion: F) -> Self
    where
        F: FnOnce(&[Effect]) + 'static,
    {
        self.effect_assertions.push(Box::new(assertion));
        self
    }

    /// Run the test and execute all assertions
    ///
    /// # Panics
    ///
    /// Panics if initial state, action, or environment is not set,
    /// or if any assertions fail.
    #[allow(clippy::expect_used)] // Test code can use expect
    pub fn run(self) {
        let mut state = self
            .initial_state
            .expect("Initial state must be set with given_state()");

        let action = self.action.expect("Action must be set with when_action()");

        let env = self
            .environment
            .expect("Environment must be set with with_env()");

        // Execute reducer
        let effects = self.reducer.reduce(&mut state, action, &env);

        // Run state assertions
        for assertion in self.state_assertions {
            assertion(&state);
        }

        // Run effect assertions
        for assertion in self.effect_assertions {
            assertion(&effects);
        }
    }
}

/// Helper assertions for effects
pub mod assertions {
    use taskstore_core::effect::Effect;

    /// Assert that there are no effects (or only [`Effect::None`])
    ///
    /// # Panics
    ///
    /// Panics if a meaningful effect is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_no_effects(effects: &[Effect]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert the number of effects
    ///
    /// # Panics
    ///
    /// Panics if the number of effects doesn't match expected.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_effects_count(effects: &[Effect], expected: usize) {
        assert_eq!(
            effects.len(),
            expected,
            "Expected {} effects, but found {}",
            expected,
            effects.len()
        );
    }

    /// Assert that the collection will be persisted
    ///
    /// # Panics
    ///
    /// Panics if no [`Effect::PersistTodos`] is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_persists_todos(effects: &[Effect]) {
        assert!(
            effects.iter().any(|e| matches!(e, Effect::PersistTodos)),
            "Expected a PersistTodos effect, but none found"
        );
    }

    /// Assert that the current-user id will be persisted
    ///
    /// # Panics
    ///
    /// Panics if no [`Effect::PersistCurrentUser`] is present.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_persists_current_user(effects: &[Effect]) {
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, Effect::PersistCurrentUser(_))),
            "Expected a PersistCurrentUser effect, but none found"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskstore_core::action::TodoAction;
    use taskstore_core::environment::TodoEnvironment;
    use taskstore_core::reducer::TodoReducer;
    use taskstore_core::state::TodoState;
    use taskstore_core::todo::{CreateTodoRequest, Priority, TodoId, UserId};

    #[test]
    fn harness_runs_state_and_effect_assertions() {
        ReducerTest::new(TodoReducer::new())
            .with_env(TodoEnvironment::system())
            .given_state(TodoState::for_user(UserId::new(1)))
            .when_action(TodoAction::CreateTodo {
                id: TodoId::new(1),
                request: CreateTodoRequest::new("Buy milk", Priority::Low, UserId::new(1)),
            })
            .then_state(|state| {
                assert_eq!(state.len(), 1);
            })
            .then_effects(assertions::assert_persists_todos)
            .run();
    }

    #[test]
    fn assertions_no_effects_accepts_none() {
        assertions::assert_no_effects(&[Effect::None]);
        assertions::assert_no_effects(&[]);
    }

    #[test]
    fn assertions_effects_count() {
        assertions::assert_effects_count(&[Effect::None], 1);
        assertions::assert_effects_count(&[], 0);
    }
}
