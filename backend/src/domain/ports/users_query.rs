//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch user-visible data
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Number of accounts shown on the admin dashboard.
pub const RECENT_USERS_LIMIT: usize = 100;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Newest accounts first, at most `limit`.
    async fn list_recent_users(&self, limit: usize) -> Result<Vec<User>, Error>;

    /// The account behind a session; not found if it has since been removed.
    async fn profile(&self, user_id: &UserId) -> Result<User, Error>;
}
