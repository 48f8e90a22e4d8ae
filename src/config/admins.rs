//! Admin configuration module for resolving Discord users to principals.
//!
//! Administrators are listed in the `ADMIN_USER_IDS` environment variable as a
//! comma-separated list of Discord user IDs. Everybody else acts as staff.

use crate::core::principal::{Principal, Role};
use std::collections::HashSet;

/// Environment variable holding the administrator user IDs
pub const ADMIN_IDS_VAR: &str = "ADMIN_USER_IDS";

/// Parses a comma-separated list of user IDs, ignoring blanks and whitespace.
#[must_use]
pub fn parse_admin_ids(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Reads the administrator set from the environment.
///
/// An unset variable means nobody has admin rights.
#[must_use]
pub fn get_admin_ids() -> HashSet<String> {
    std::env::var(ADMIN_IDS_VAR)
        .map(|raw| parse_admin_ids(&raw))
        .unwrap_or_default()
}

/// Builds the principal for a user, granting `Admin` when the ID is listed.
#[must_use]
pub fn resolve_principal(user_id: &str, admin_ids: &HashSet<String>) -> Principal {
    let role = if admin_ids.contains(user_id) {
        Role::Admin
    } else {
        Role::Staff
    };
    Principal::new(user_id, role)
}
