//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL.

use crate::entities::{Application, ApplicationColumn, AuditLog, Staff};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index,
};
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/serial_buddy.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Returns the file a `SQLite` URL points at, or None for in-memory and non-`SQLite` URLs.
#[must_use]
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") || path == "memory" {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file if no environment variable is set. The file's
/// parent directory is created when missing.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let url = get_database_url();

    if let Some(parent) = sqlite_file_path(&url)
        .as_deref()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }

    info!("Connecting to database...");
    Database::connect(&url).await.map_err(Into::into)
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables that do not exist yet.
///
/// Safe to call on every start-up; existing tables and data are left alone.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Staff).await?;
    create_table(db, &schema, Application).await?;
    create_table(db, &schema, AuditLog).await?;

    // A serial value belongs to exactly one application per staff member
    let index = Index::create()
        .name("idx_applications_staff_serial")
        .table(Application)
        .col(ApplicationColumn::StaffId)
        .col(ApplicationColumn::SerialValue)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(db.get_database_backend().build(&index)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{ApplicationModel, AuditLogModel, StaffModel};
    use crate::test_utils::setup_test_db;
    use sea_orm::QuerySelect;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(
            sqlite_file_path(DEFAULT_DATABASE_URL),
            Some(PathBuf::from("data/serial_buddy.sqlite"))
        );
        assert_eq!(
            sqlite_file_path("sqlite:serials.db"),
            Some(PathBuf::from("serials.db"))
        );
        assert_eq!(sqlite_file_path("sqlite::memory:"), None);
        assert_eq!(sqlite_file_path("postgres://localhost/serials"), None);
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = setup_test_db().await?;

        // Test that tables exist by querying them
        let _: Vec<StaffModel> = Staff::find().limit(1).all(&db).await?;
        let _: Vec<ApplicationModel> = Application::find().limit(1).all(&db).await?;
        let _: Vec<AuditLogModel> = AuditLog::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_serial_value_unique_per_staff() -> Result<()> {
        use crate::core::staff::create_staff;
        use crate::entities::application;
        use sea_orm::{ActiveModelTrait, Set};

        let db = setup_test_db().await?;
        create_staff(&db, "a", "Anele").await?;
        create_staff(&db, "b", "Bongani").await?;

        let row = |staff_id: &str, serial_number: &str| application::ActiveModel {
            serial_number: Set(serial_number.to_string()),
            serial_value: Set(1),
            staff_id: Set(staff_id.to_string()),
            applicant_name: Set("Applicant".to_string()),
            applicant_id_number: Set("123".to_string()),
            cover_plan: Set("Plan".to_string()),
            document_paths: Set(String::new()),
            delivered: Set(false),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };

        row("a", "a-000001").insert(&db).await?;
        // Same value under another staff member is fine
        row("b", "b-000001").insert(&db).await?;
        // Same staff and value under a different rendering is not
        assert!(row("a", "a-0001").insert(&db).await.is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_repeatable() -> Result<()> {
        let db = setup_test_db().await?;
        create_tables(&db).await?;

        let _: Vec<StaffModel> = Staff::find().limit(1).all(&db).await?;
        Ok(())
    }
}
