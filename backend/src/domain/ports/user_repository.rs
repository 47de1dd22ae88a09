//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, PasswordDigest, Role, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique constraint on username or email rejected the write.
        Conflict { message: String } => "user already exists: {message}",
    }
}

/// Account row to insert or upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: PasswordDigest,
    pub role: Role,
}

/// A user together with the stored password hash, for authentication only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: PasswordDigest,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// Returns [`UserPersistenceError::Conflict`] when the username or email
    /// is already taken.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Insert the user, or overwrite email, password hash and role of the
    /// existing user with the same username.
    async fn upsert_by_username(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Whether any user already holds this username or this email.
    async fn username_or_email_taken(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<bool, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch credentials for the user whose username or email equals
    /// `identifier`.
    async fn find_credentials(
        &self,
        identifier: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Newest users first, at most `limit` of them.
    async fn list_recent(&self, limit: usize) -> Result<Vec<User>, UserPersistenceError>;

    /// Delete a user by username. Returns whether a row was removed.
    async fn delete_by_username(&self, username: &Username)
    -> Result<bool, UserPersistenceError>;
}
