//! Application entity - A membership application stamped with a serial number.
//!
//! Every row corresponds to exactly one successful serial issuance. Document paths
//! point into the external blob store and are stored newline-separated.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Application database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    /// Unique identifier for the application
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Formatted serial number printed on the application, scoped by staff ID
    #[sea_orm(unique)]
    pub serial_number: String,
    /// Raw serial value drawn from the staff member's range; unique per staff member
    pub serial_value: i64,
    /// Staff member who captured the application
    pub staff_id: String,
    /// Full name of the applicant
    pub applicant_name: String,
    /// Applicant's national identity number
    pub applicant_id_number: String,
    /// Cover plan the applicant selected
    pub cover_plan: String,
    /// Blob store paths of uploaded photos and documents, one per line
    pub document_paths: String,
    /// Whether the rendered application reached the delivery sink; also set while a
    /// delivery holds the row
    pub delivered: bool,
    /// When the application was captured
    pub created_at: DateTimeUtc,
}

impl Model {
    /// Splits `document_paths` back into individual paths.
    pub fn document_paths(&self) -> impl Iterator<Item = &str> {
        self.document_paths.lines().filter(|line| !line.is_empty())
    }
}

/// Defines relationships between Application and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each application belongs to one staff member
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
