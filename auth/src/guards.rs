//! Route guards: pure predicates consulted before activating a protected
//! view.
//!
//! A guard never mutates anything; on denial it returns the view the
//! routing layer should redirect to. Performing the navigation is the
//! router's job.

use crate::User;

/// Where to send a caller whose guard check failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redirect {
    /// The login view, for callers with nobody signed in
    Login,
    /// The default task-list view, for signed-in callers lacking authorization
    TodoList,
}

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The view may be activated
    Allow,
    /// The view must not be activated; redirect instead
    Redirect(Redirect),
}

impl GuardDecision {
    /// Returns `true` when the view may be activated
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Allows any authenticated user; redirects to login otherwise.
#[must_use]
pub fn auth_guard(user: Option<&User>) -> GuardDecision {
    if user.is_some() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect(Redirect::Login)
    }
}

/// Allows only authenticated admins; everyone else lands on the task list.
#[must_use]
pub fn admin_guard(user: Option<&User>) -> GuardDecision {
    match user {
        Some(user) if user.role.is_admin() => GuardDecision::Allow,
        _ => GuardDecision::Redirect(Redirect::TodoList),
    }
}
