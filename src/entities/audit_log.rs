//! Audit log entity - Append-only trail of administrator actions.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Staff member the action was applied to
    pub staff_id: String,
    /// Principal who performed the action
    pub actor_id: String,
    /// Action key, e.g. `"transition"` or `"set_range"`
    pub action: String,
    /// Human-readable description of the change
    pub detail: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::StaffId"
    )]
    Staff,
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
