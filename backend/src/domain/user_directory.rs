//! User directory service: signup, login and account administration.
//!
//! Implements the [`LoginService`], [`RegistrationService`] and [`UsersQuery`]
//! driving ports over a [`UserRepository`], plus the out-of-band operations
//! used by the admin CLI.

use std::sync::Arc;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{
    ACCOUNT_EXISTS, INVALID_CREDENTIALS, LoginService, NewUser, RegistrationService,
    UserPersistenceError, UserRepository, UsersQuery,
};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, PasswordDigest, Registration, Role, User, UserId,
    Username,
};

/// Account service backed by a user repository.
#[derive(Clone)]
pub struct UserDirectoryService<R> {
    users: Arc<R>,
}

impl<R> UserDirectoryService<R> {
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> UserDirectoryService<R>
where
    R: UserRepository,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserPersistenceError::Conflict { .. } => Error::conflict(ACCOUNT_EXISTS),
        }
    }

    /// Run Argon2 verification on the blocking pool.
    ///
    /// A missing account is checked against [`PasswordDigest::decoy`] so the
    /// response time matches a wrong password.
    async fn verify_password(
        digest: Option<PasswordDigest>,
        candidate: &str,
    ) -> Result<bool, Error> {
        let candidate = Zeroizing::new(candidate.to_owned());
        tokio::task::spawn_blocking(move || match digest {
            Some(digest) => digest.verify(&candidate),
            None => {
                if let Some(decoy) = PasswordDigest::decoy() {
                    let _ = decoy.verify(&candidate);
                }
                false
            }
        })
        .await
        .map_err(|err| Error::internal(format!("password verification failed: {err}")))
    }

    fn hash_password(password: &str) -> Result<PasswordDigest, Error> {
        PasswordDigest::hash(password).map_err(|err| Error::internal(err.to_string()))
    }

    /// Create or refresh an administrator account.
    ///
    /// An existing account with the same username keeps its id; its email and
    /// password are replaced and its role is forced to admin.
    pub async fn seed_admin(
        &self,
        username: Username,
        email: EmailAddress,
        password: &str,
    ) -> Result<User, Error> {
        if password.is_empty() {
            return Err(Error::invalid_request("admin password must not be empty"));
        }
        let account = NewUser {
            id: UserId::random(),
            username,
            email,
            password_hash: Self::hash_password(password)?,
            role: Role::Admin,
        };
        self.users
            .upsert_by_username(&account)
            .await
            .map_err(Self::map_persistence_error)
    }

    /// Remove an account and, through the storage cascade, its reports.
    pub async fn delete_user(&self, username: &Username) -> Result<(), Error> {
        let removed = self
            .users
            .delete_by_username(username)
            .await
            .map_err(Self::map_persistence_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found(format!("no user named {username}")))
        }
    }
}

#[async_trait]
impl<R> RegistrationService for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let taken = self
            .users
            .username_or_email_taken(registration.username(), registration.email())
            .await
            .map_err(Self::map_persistence_error)?;
        if taken {
            return Err(Error::conflict(ACCOUNT_EXISTS));
        }

        let account = NewUser {
            id: UserId::random(),
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash: Self::hash_password(registration.password())?,
            role: Role::Standard,
        };
        // The unique indexes still guard against a concurrent signup racing
        // past the check above.
        self.users
            .insert(&account)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R> LoginService for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let found = self
            .users
            .find_credentials(credentials.identifier())
            .await
            .map_err(Self::map_persistence_error)?;
        let (user, digest) = match found {
            Some(stored) => (Some(stored.user), Some(stored.password_hash)),
            None => (None, None),
        };
        let verified = Self::verify_password(digest, credentials.password()).await?;
        match user {
            Some(user) if verified => Ok(user),
            _ => Err(Error::unauthorized(INVALID_CREDENTIALS)),
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn list_recent_users(&self, limit: usize) -> Result<Vec<User>, Error> {
        self.users
            .list_recent(limit)
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found("account no longer exists"))
    }
}

#[cfg(test)]
#[path = "user_directory_tests.rs"]
mod tests;
