//! Audit trail of administrator actions.
//!
//! Events are written after the change they describe has committed. A failed audit
//! write is logged and does not undo or fail the change itself.

use crate::{
    entities::{AuditLog, audit_log},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use tracing::warn;

/// Appends one audit event.
pub async fn record_event<C>(
    db: &C,
    staff_id: &str,
    actor_id: &str,
    action: &str,
    detail: String,
) -> Result<audit_log::Model>
where
    C: ConnectionTrait,
{
    let event = audit_log::ActiveModel {
        staff_id: Set(staff_id.to_string()),
        actor_id: Set(actor_id.to_string()),
        action: Set(action.to_string()),
        detail: Set(detail),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    event.insert(db).await.map_err(Into::into)
}

/// Appends an audit event, logging instead of failing when the insert does not go through.
pub async fn record_event_best_effort<C>(
    db: &C,
    staff_id: &str,
    actor_id: &str,
    action: &str,
    detail: String,
) where
    C: ConnectionTrait,
{
    if let Err(e) = record_event(db, staff_id, actor_id, action, detail).await {
        warn!(staff_id, actor_id, action, "Failed to write audit event: {e}");
    }
}

/// Returns the audit events for one staff member, newest first.
pub async fn list_events_for_staff(
    db: &DatabaseConnection,
    staff_id: &str,
    limit: u64,
) -> Result<Vec<audit_log::Model>> {
    AuditLog::find()
        .filter(audit_log::Column::StaffId.eq(staff_id))
        .order_by_desc(audit_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_events_listed_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        crate::core::staff::create_staff(&db, "s1", "Thandi").await?;
        crate::core::staff::create_staff(&db, "s2", "Pieter").await?;

        record_event(&db, "s1", "admin", "transition", "pending -> active".to_string()).await?;
        record_event(&db, "s1", "admin", "set_range", "none -> 1-100".to_string()).await?;
        record_event(&db, "s2", "admin", "transition", "pending -> rejected".to_string()).await?;

        let events = list_events_for_staff(&db, "s1", 10).await?;
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].action, "set_range");
        assert_eq!(events[1].action, "transition");

        let limited = list_events_for_staff(&db, "s1", 1).await?;
        assert_eq!(limited.len(), 1);

        Ok(())
    }
}
