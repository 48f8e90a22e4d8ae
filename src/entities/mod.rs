//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod application;
pub mod audit_log;
pub mod staff;

// Re-export specific types to avoid conflicts
pub use application::{
    Column as ApplicationColumn, Entity as Application, Model as ApplicationModel,
};
pub use audit_log::{Column as AuditLogColumn, Entity as AuditLog, Model as AuditLogModel};
pub use staff::{Column as StaffColumn, Entity as Staff, Model as StaffModel, StaffStatus};
