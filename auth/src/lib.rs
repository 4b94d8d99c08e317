//! # Taskstore Auth
//!
//! User identity and route-level access decisions.
//!
//! This crate holds what the rest of the system needs to know about
//! authentication: who a [`User`] is, which [`Role`] they carry, an
//! explicit [`Session`] holding the currently authenticated user, and the
//! pure [`guards`] consulted before activating a protected view.
//!
//! Authentication itself (how a session comes to hold a user) is external;
//! the store and the guards only ever read the current user.

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use taskstore_core::todo::UserId;

pub mod guards;

/// Access role of a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access, including the admin area
    Admin,
    /// Regular access to the task list
    User,
}

impl Role {
    /// Returns `true` for [`Role::Admin`]
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// An authenticated user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, shared with the todo domain
    pub id: UserId,
    /// Login name
    pub username: String,
    /// Access role
    pub role: Role,
}

impl User {
    /// Creates a user record
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            username: username.into(),
            role,
        }
    }
}

/// Explicit holder of the currently authenticated user.
///
/// Replaces an ambient service singleton: whoever owns the session decides
/// who is signed in, and guards and the store consult it through
/// [`Session::current_user`].
#[derive(Debug, Default)]
pub struct Session {
    user: RwLock<Option<User>>,
}

impl Session {
    /// Creates a session with nobody signed in
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with the given user already signed in
    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self {
            user: RwLock::new(Some(user)),
        }
    }

    /// The currently authenticated user, if any
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.lock_read().clone()
    }

    /// Signs a user in, replacing any previous one
    pub fn sign_in(&self, user: User) {
        *self.lock_write() = Some(user);
    }

    /// Signs the current user out
    pub fn sign_out(&self) {
        *self.lock_write() = None;
    }

    #[allow(clippy::unwrap_used)] // lock poison is unrecoverable
    fn lock_read(&self) -> std::sync::RwLockReadGuard<'_, Option<User>> {
        self.user.read().unwrap()
    }

    #[allow(clippy::unwrap_used)] // lock poison is unrecoverable
    fn lock_write(&self) -> std::sync::RwLockWriteGuard<'_, Option<User>> {
        self.user.write().unwrap()
    }
}
