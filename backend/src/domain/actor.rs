//! The authenticated user on whose behalf an operation runs.

use super::{Role, UserId};

/// Identity and role of the caller, as established by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Whether this actor may read a resource owned by `owner`.
    #[must_use]
    pub fn can_read_owned_by(&self, owner: &UserId) -> bool {
        self.role.is_admin() || self.id == *owner
    }
}
