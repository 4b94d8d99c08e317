//! Collection state and derived views.
//!
//! [`TodoState`] holds the authoritative in-memory collection for the active
//! user. Derived views are plain methods recomputed from the current
//! collection on every call. There is no cached or reactive layer, so a
//! view can never be stale with respect to the latest mutation.

use serde::{Deserialize, Serialize};

use crate::todo::{Priority, Todo, TodoId, TodoStatus, UserId};

/// The in-memory todo collection for the currently selected user.
///
/// Insertion order is the collection order and is preserved by every read
/// and filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All records, in insertion order
    pub todos: Vec<Todo>,
    /// The user whose collection this is
    pub current_user: UserId,
}

/// Aggregate summary over the current collection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TodoStats {
    /// Number of records
    pub total: usize,
    /// Records with status `done`
    pub completed: usize,
    /// Records with status `in-progress`
    pub in_progress: usize,
    /// Records with status `todo`
    pub pending: usize,
    /// Records with priority `high`
    pub high_priority: usize,
    /// `completed / total × 100`; `0` when the collection is empty
    pub completion_rate: f64,
}

impl TodoState {
    /// Creates an empty collection scoped to the given user
    #[must_use]
    pub const fn for_user(user: UserId) -> Self {
        Self {
            todos: Vec::new(),
            current_user: user,
        }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Returns `true` when the collection holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Returns the record with the given id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Checks whether a record with the given id exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Records with the given status, in insertion order
    #[must_use]
    pub fn by_status(&self, status: TodoStatus) -> Vec<Todo> {
        self.todos
            .iter()
            .filter(|todo| todo.status == status)
            .cloned()
            .collect()
    }

    /// Records with the given priority, in insertion order
    #[must_use]
    pub fn by_priority(&self, priority: Priority) -> Vec<Todo> {
        self.todos
            .iter()
            .filter(|todo| todo.priority == priority)
            .cloned()
            .collect()
    }

    /// Records with status `done`
    #[must_use]
    pub fn completed(&self) -> Vec<Todo> {
        self.by_status(TodoStatus::Done)
    }

    /// Records with status `todo`
    #[must_use]
    pub fn pending(&self) -> Vec<Todo> {
        self.by_status(TodoStatus::Todo)
    }

    /// Records with status `in-progress`
    #[must_use]
    pub fn in_progress(&self) -> Vec<Todo> {
        self.by_status(TodoStatus::InProgress)
    }

    /// Records with priority `high`
    #[must_use]
    pub fn high_priority(&self) -> Vec<Todo> {
        self.by_priority(Priority::High)
    }

    /// Aggregate summary of the current collection.
    ///
    /// `completion_rate` is defined as `0` for an empty collection.
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        let total = self.todos.len();
        let mut completed = 0usize;
        let mut in_progress = 0usize;
        let mut pending = 0usize;
        let mut high_priority = 0usize;

        for todo in &self.todos {
            match todo.status {
                TodoStatus::Done => completed += 1,
                TodoStatus::InProgress => in_progress += 1,
                TodoStatus::Todo => pending += 1,
            }
            if todo.priority == Priority::High {
                high_priority += 1;
            }
        }

        #[allow(clippy::cast_precision_loss)] // collection sizes are far below 2^52
        let completion_rate = if total == 0 {
            0.0
        } else {
            (completed as f64 / total as f64) * 100.0
        };

        TodoStats {
            total,
            completed,
            in_progress,
            pending,
            high_priority,
            completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::CreateTodoRequest;
    use chrono::{TimeZone, Utc};
    use proptest::prelude::*;

    fn record(id: i64, status: TodoStatus, priority: Priority) -> Todo {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).single().unwrap();
        let mut todo = Todo::from_request(
            TodoId::new(id),
            CreateTodoRequest::new(format!("todo {id}"), priority, UserId::new(1)),
            UserId::new(1),
            created,
        );
        todo.status = status;
        todo
    }

    #[test]
    fn empty_state_has_zero_completion_rate() {
        let state = TodoState::for_user(UserId::new(1));
        let stats = state.stats();
        assert_eq!(stats.total, 0);
        assert!((stats.completion_rate - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn one_done_of_two_is_fifty_percent() {
        let mut state = TodoState::for_user(UserId::new(1));
        state.todos.push(record(1, TodoStatus::Done, Priority::Low));
        state.todos.push(record(2, TodoStatus::Todo, Priority::Low));

        let stats = state.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert!((stats.completion_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn filters_preserve_insertion_order() {
        let mut state = TodoState::for_user(UserId::new(1));
        state.todos.push(record(3, TodoStatus::Done, Priority::Low));
        state.todos.push(record(1, TodoStatus::Todo, Priority::High));
        state.todos.push(record(2, TodoStatus::Done, Priority::High));

        let done: Vec<i64> = state.completed().iter().map(|t| t.id.get()).collect();
        assert_eq!(done, vec![3, 2]);

        let high: Vec<i64> = state.high_priority().iter().map(|t| t.id.get()).collect();
        assert_eq!(high, vec![1, 2]);
    }

    #[test]
    fn get_and_contains_find_by_id() {
        let mut state = TodoState::for_user(UserId::new(1));
        state.todos.push(record(7, TodoStatus::Todo, Priority::Medium));

        assert!(state.contains(TodoId::new(7)));
        assert_eq!(state.get(TodoId::new(7)).map(|t| t.id.get()), Some(7));
        assert!(!state.contains(TodoId::new(8)));
    }

    fn arb_status() -> impl Strategy<Value = TodoStatus> {
        prop_oneof![
            Just(TodoStatus::Todo),
            Just(TodoStatus::InProgress),
            Just(TodoStatus::Done),
        ]
    }

    fn arb_priority() -> impl Strategy<Value = Priority> {
        prop_oneof![Just(Priority::Low), Just(Priority::Medium), Just(Priority::High)]
    }

    proptest! {
        #[test]
        fn status_counts_partition_the_collection(
            entries in proptest::collection::vec((arb_status(), arb_priority()), 0..64)
        ) {
            let mut state = TodoState::for_user(UserId::new(1));
            for (index, (status, priority)) in entries.iter().enumerate() {
                state.todos.push(record(i64::try_from(index).unwrap(), *status, *priority));
            }

            let stats = state.stats();
            prop_assert_eq!(stats.completed + stats.in_progress + stats.pending, stats.total);
            prop_assert_eq!(stats.completed, state.completed().len());
            prop_assert_eq!(stats.high_priority, state.high_priority().len());
            prop_assert!(stats.completion_rate >= 0.0 && stats.completion_rate <= 100.0);
        }

        #[test]
        fn status_filters_are_exact_and_ordered(
            entries in proptest::collection::vec(arb_status(), 0..64)
        ) {
            let mut state = TodoState::for_user(UserId::new(1));
            for (index, status) in entries.iter().enumerate() {
                state.todos.push(record(i64::try_from(index).unwrap(), *status, Priority::Low));
            }

            let done = state.by_status(TodoStatus::Done);
            prop_assert!(done.iter().all(|t| t.status == TodoStatus::Done));

            let expected: Vec<TodoId> = state
                .todos
                .iter()
                .filter(|t| t.status == TodoStatus::Done)
                .map(|t| t.id)
                .collect();
            let actual: Vec<TodoId> = done.iter().map(|t| t.id).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
