//! Shared test utilities for `SerialBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating staff records in a known state.

use crate::{
    config::settings::Settings,
    core::{
        application::{ApplicationInput, DeliverySink},
        principal::{Principal, Role},
        retry::RetryPolicy,
        serial::SerialFormat,
        staff,
    },
    entities::{self, Staff, StaffStatus},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, DatabaseConnection, EntityTrait, Set,
};
use std::future::Future;
use std::sync::Mutex;

/// Creates an in-memory `SQLite` database with all tables initialized.
///
/// The pool is pinned to one connection: every `sqlite::memory:` connection is its
/// own database, so a second connection would see empty tables.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Retry policy with enough attempts for the concurrency tests and no real sleeping.
#[must_use]
pub const fn test_retry_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 32,
        base_delay_ms: 0,
        max_delay_ms: 1,
    }
}

/// Settings printing serials as `T-{staff_id}-000123`.
#[must_use]
pub fn test_settings() -> Settings {
    Settings {
        serial: SerialFormat {
            prefix: "T-".to_string(),
            width: 6,
        },
        retry: test_retry_policy(),
    }
}

/// An administrator principal.
#[must_use]
pub fn test_admin() -> Principal {
    Principal::new("admin-1", Role::Admin)
}

/// Creates an active staff member with the range `[start, end]` and a fresh cursor.
pub async fn create_active_staff(
    db: &DatabaseConnection,
    staff_id: &str,
    start: i64,
    end: i64,
) -> Result<entities::StaffModel> {
    let record = staff::create_staff(db, staff_id, &format!("Staff {staff_id}")).await?;
    let mut active: entities::staff::ActiveModel = record.into();
    active.status = Set(StaffStatus::Active);
    active.range_start = Set(Some(start));
    active.range_end = Set(Some(end));
    active.update(db).await.map_err(Into::into)
}

/// Creates an active staff member that has no range yet.
pub async fn create_active_staff_without_range(
    db: &DatabaseConnection,
    staff_id: &str,
) -> Result<entities::StaffModel> {
    let record = staff::create_staff(db, staff_id, &format!("Staff {staff_id}")).await?;
    let mut active: entities::staff::ActiveModel = record.into();
    active.status = Set(StaffStatus::Active);
    active.update(db).await.map_err(Into::into)
}

/// Forces the serial cursor to a value, bypassing the issuer.
pub async fn set_current_serial<C>(db: &C, staff_id: &str, current_serial: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let record = Staff::find_by_id(staff_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::StaffNotFound {
            staff_id: staff_id.to_string(),
        })?;
    let mut active: entities::staff::ActiveModel = record.into();
    active.current_serial = Set(current_serial);
    active.update(db).await?;
    Ok(())
}

/// Builds an active staff model for mock query results.
#[must_use]
pub fn staff_with_cursor(
    staff_id: &str,
    range: (i64, i64),
    current_serial: i64,
) -> entities::StaffModel {
    let now = chrono::Utc::now();
    entities::StaffModel {
        staff_id: staff_id.to_string(),
        display_name: format!("Staff {staff_id}"),
        status: StaffStatus::Active,
        range_start: Some(range.0),
        range_end: Some(range.1),
        current_serial,
        created_at: now,
        updated_at: now,
    }
}

/// A complete, valid application form.
#[must_use]
pub fn sample_application_input() -> ApplicationInput {
    ApplicationInput {
        applicant_name: "Nomsa Dlamini".to_string(),
        applicant_id_number: "8001015009087".to_string(),
        cover_plan: "Family Plan B".to_string(),
        document_paths: vec![
            "photos/s1/id.jpg".to_string(),
            "docs/s1/proof.pdf".to_string(),
        ],
    }
}

/// Sink that remembers the serial numbers it was handed.
#[derive(Debug, Default)]
pub struct RecordingSink {
    serials: Mutex<Vec<String>>,
}

impl RecordingSink {
    /// Serial numbers delivered so far, in delivery order.
    #[allow(clippy::unwrap_used)]
    pub fn delivered(&self) -> Vec<String> {
        self.serials.lock().unwrap().clone()
    }
}

impl DeliverySink for RecordingSink {
    #[allow(clippy::unwrap_used)]
    fn deliver(
        &self,
        application: &entities::ApplicationModel,
    ) -> impl Future<Output = Result<()>> + Send {
        self.serials
            .lock()
            .unwrap()
            .push(application.serial_number.clone());
        std::future::ready(Ok(()))
    }
}

/// Sink whose deliveries always fail.
#[derive(Debug, Default)]
pub struct FailingSink;

impl DeliverySink for FailingSink {
    fn deliver(
        &self,
        _application: &entities::ApplicationModel,
    ) -> impl Future<Output = Result<()>> + Send {
        std::future::ready(Err(Error::Delivery {
            message: "mail relay unavailable".to_string(),
        }))
    }
}
