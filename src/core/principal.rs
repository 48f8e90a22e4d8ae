//! Caller identity handed to every operation that needs authorization.

use crate::errors::{Error, Result};

/// What a principal is allowed to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Approves staff, edits ranges, reads usage
    Admin,
    /// Submits applications against their own staff record
    Staff,
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Identity provider's user ID; doubles as the caller's `staff_id`
    pub id: String,
    pub role: Role,
}

impl Principal {
    /// Creates a principal with the given ID and role.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fails with [`Error::Unauthorized`] unless the principal is an administrator.
    pub fn require_admin(&self, action: &'static str) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(Error::Unauthorized {
                principal_id: self.id.clone(),
                action,
            })
        }
    }
}
