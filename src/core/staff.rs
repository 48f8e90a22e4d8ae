//! Staff record store - creation, point lookups and full scans of staff accounts.
//!
//! Mutations of status, range and cursor live in [`super::admin`], [`super::range`]
//! and [`super::serial`]; this module only creates rows and reads them back.

use crate::{
    entities::{Staff, StaffStatus, staff},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Creates a staff account at signup: `pending`, no range, cursor at 0.
///
/// Fails with [`Error::StaffExists`] when the ID is already registered.
pub async fn create_staff(
    db: &DatabaseConnection,
    staff_id: &str,
    display_name: &str,
) -> Result<staff::Model> {
    let staff_id = staff_id.trim();
    let display_name = display_name.trim();

    if staff_id.is_empty() {
        return Err(Error::InvalidInput {
            message: "Staff ID cannot be empty".to_string(),
        });
    }
    if display_name.is_empty() {
        return Err(Error::InvalidInput {
            message: "Display name cannot be empty".to_string(),
        });
    }

    if get_staff_by_id(db, staff_id).await?.is_some() {
        return Err(Error::StaffExists {
            staff_id: staff_id.to_string(),
        });
    }

    let now = chrono::Utc::now();
    let record = staff::ActiveModel {
        staff_id: Set(staff_id.to_string()),
        display_name: Set(display_name.to_string()),
        status: Set(StaffStatus::Pending),
        range_start: Set(None),
        range_end: Set(None),
        current_serial: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let result = record.insert(db).await?;
    info!(staff_id = %result.staff_id, "Staff member signed up");
    Ok(result)
}

/// Finds a staff member by ID, returning None if not found.
pub async fn get_staff_by_id<C>(db: &C, staff_id: &str) -> Result<Option<staff::Model>>
where
    C: ConnectionTrait,
{
    Staff::find_by_id(staff_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`get_staff_by_id`] but treats a missing row as [`Error::StaffNotFound`].
pub async fn require_staff<C>(db: &C, staff_id: &str) -> Result<staff::Model>
where
    C: ConnectionTrait,
{
    get_staff_by_id(db, staff_id)
        .await?
        .ok_or_else(|| Error::StaffNotFound {
            staff_id: staff_id.to_string(),
        })
}

/// Returns every staff record, ordered by display name.
pub async fn list_all_staff(db: &DatabaseConnection) -> Result<Vec<staff::Model>> {
    Staff::find()
        .order_by_asc(staff::Column::DisplayName)
        .order_by_asc(staff::Column::StaffId)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns the staff records in one status, ordered by display name.
pub async fn list_staff_by_status(
    db: &DatabaseConnection,
    status: StaffStatus,
) -> Result<Vec<staff::Model>> {
    Staff::find()
        .filter(staff::Column::Status.eq(status))
        .order_by_asc(staff::Column::DisplayName)
        .order_by_asc(staff::Column::StaffId)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_staff_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_staff(&db, "  ", "Thandi").await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));

        let result = create_staff(&db, "s1", "").await;
        assert!(matches!(result, Err(Error::InvalidInput { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_staff_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let record = create_staff(&db, "s1", " Thandi ").await?;
        assert_eq!(record.staff_id, "s1");
        assert_eq!(record.display_name, "Thandi");
        assert_eq!(record.status, StaffStatus::Pending);
        assert_eq!(record.range(), None);
        assert_eq!(record.current_serial, 0);

        let stored = get_staff_by_id(&db, "s1").await?.unwrap();
        assert_eq!(stored, record);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_staff_duplicate() -> Result<()> {
        let db = setup_test_db().await?;
        create_staff(&db, "s1", "Thandi").await?;

        let result = create_staff(&db, "s1", "Someone Else").await;
        assert!(matches!(result, Err(Error::StaffExists { staff_id }) if staff_id == "s1"));

        Ok(())
    }

    #[tokio::test]
    async fn test_require_staff_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = require_staff(&db, "ghost").await;
        assert!(matches!(result, Err(Error::StaffNotFound { staff_id }) if staff_id == "ghost"));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_staff_by_status() -> Result<()> {
        let db = setup_test_db().await?;
        create_staff(&db, "s1", "Zanele").await?;
        create_staff(&db, "s2", "Anton").await?;
        create_active_staff(&db, "s3", 1, 100).await?;

        let all = list_all_staff(&db).await?;
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].display_name, "Anton");

        let pending = list_staff_by_status(&db, StaffStatus::Pending).await?;
        let ids: Vec<&str> = pending.iter().map(|s| s.staff_id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s1"]);

        let active = list_staff_by_status(&db, StaffStatus::Active).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].staff_id, "s3");

        Ok(())
    }
}
