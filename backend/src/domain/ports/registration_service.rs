//! Driving port for account signup.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Message returned when the username or email is already in use.
pub const ACCOUNT_EXISTS: &str = "Username or email already exists";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create a standard-role account.
    ///
    /// Fails with [`crate::domain::ErrorCode::Conflict`] and [`ACCOUNT_EXISTS`]
    /// when the username or email is taken.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}
