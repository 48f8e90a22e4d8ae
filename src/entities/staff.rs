//! Staff entity - One row per staff account entitled to issue serial numbers.
//!
//! Each staff member carries an approval status, an optional closed serial range
//! `[range_start, range_end]` and the serial cursor `current_serial` (0 until the
//! first serial is issued). The cursor is only ever advanced by the serial issuer.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Approval status of a staff account
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum StaffStatus {
    /// Signed up, waiting for an administrator
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved and allowed to submit applications
    #[sea_orm(string_value = "active")]
    Active,
    /// Signup declined by an administrator
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// Previously active, access withdrawn
    #[sea_orm(string_value = "terminated")]
    Terminated,
}

impl StaffStatus {
    /// Lowercase name as stored in the database
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Rejected => "rejected",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for StaffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    /// Opaque identifier handed out by the identity provider
    #[sea_orm(primary_key, auto_increment = false)]
    pub staff_id: String,
    /// Name shown to administrators
    pub display_name: String,
    /// Current approval status
    pub status: StaffStatus,
    /// First serial of the assigned range, inclusive
    pub range_start: Option<i64>,
    /// Last serial of the assigned range, inclusive
    pub range_end: Option<i64>,
    /// Last serial issued, 0 if none yet
    pub current_serial: i64,
    /// When the account was created
    pub created_at: DateTimeUtc,
    /// When the row was last modified
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Returns the assigned range as `(start, end)` when both bounds are set.
    #[must_use]
    pub const fn range(&self) -> Option<(i64, i64)> {
        match (self.range_start, self.range_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// Defines relationships between Staff and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One staff member submits many applications
    #[sea_orm(has_many = "super::application::Entity")]
    Applications,
    /// One staff member is the subject of many audit events
    #[sea_orm(has_many = "super::audit_log::Entity")]
    AuditEvents,
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::audit_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuditEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
