//! Usage rollups over staff records.
//!
//! Everything here is derived from a snapshot of the staff table and never writes.
//! Each record is read independently, so a report may mix slightly different moments.

use crate::{
    core::staff as staff_store,
    entities::{StaffStatus, staff},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// How much of one staff member's range has been consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaffUsage {
    /// Serials issued so far
    pub used: i64,
    /// Serials still available
    pub remaining: i64,
    /// Total slots in the range
    pub capacity: i64,
    /// `used / capacity * 100`
    pub percentage: f64,
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UsageSummary {
    pub active_staff: usize,
    pub terminated_staff: usize,
    pub total_serials_used: i64,
}

/// One line of the per-staff usage table.
#[derive(Debug, Clone)]
pub struct StaffUsageRow {
    pub staff: staff::Model,
    /// None when no range is assigned
    pub usage: Option<StaffUsage>,
}

/// Summary plus per-staff rows, as rendered by the admin console.
#[derive(Debug, Clone)]
pub struct UsageReport {
    pub summary: UsageSummary,
    pub rows: Vec<StaffUsageRow>,
}

/// Computes range usage for one record, or None when it has no range.
#[must_use]
pub fn usage(record: &staff::Model) -> Option<StaffUsage> {
    let (start, end) = record.range()?;
    let capacity = end - start + 1;
    let used = if record.current_serial >= start {
        record.current_serial - start + 1
    } else {
        0
    };

    // Cast safety: serial counts stay far below 2^52, so the f64 is exact
    #[allow(clippy::cast_precision_loss)]
    let percentage = if capacity > 0 {
        used as f64 / capacity as f64 * 100.0
    } else {
        0.0
    };

    Some(StaffUsage {
        used,
        remaining: capacity - used,
        capacity,
        percentage,
    })
}

/// Counts active and terminated staff and sums serials used across all ranges.
#[must_use]
pub fn summary<'a, I>(records: I) -> UsageSummary
where
    I: IntoIterator<Item = &'a staff::Model>,
{
    records
        .into_iter()
        .fold(UsageSummary::default(), |mut acc, record| {
            match record.status {
                StaffStatus::Active => acc.active_staff += 1,
                StaffStatus::Terminated => acc.terminated_staff += 1,
                StaffStatus::Pending | StaffStatus::Rejected => {}
            }
            if let Some(u) = usage(record) {
                acc.total_serials_used += u.used;
            }
            acc
        })
}

/// Scans the staff table and builds the full usage report.
pub async fn usage_report(db: &DatabaseConnection) -> Result<UsageReport> {
    let records = staff_store::list_all_staff(db).await?;
    let summary = summary(&records);
    let rows = records
        .into_iter()
        .map(|staff| StaffUsageRow {
            usage: usage(&staff),
            staff,
        })
        .collect();

    Ok(UsageReport { summary, rows })
}

/// Generates a text bar for a usage percentage, like `[████░░░░░░] 40.0%`.
#[must_use]
pub fn format_usage_bar(percentage: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percentage.clamp(0.0, 100.0);

    // Cast safety: clamped ∈ [0, 100] and length is small, so the result is in [0, length].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {percentage:.1}%",
        "█".repeat(filled),
        "░".repeat(empty)
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::serial::issue_next;
    use crate::test_utils::*;

    fn record(status: StaffStatus, range: Option<(i64, i64)>, current: i64) -> staff::Model {
        let now = chrono::Utc::now();
        staff::Model {
            staff_id: format!("{status}-{current}"),
            display_name: "Test".to_string(),
            status,
            range_start: range.map(|r| r.0),
            range_end: range.map(|r| r.1),
            current_serial: current,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_usage_without_range() {
        assert!(usage(&record(StaffStatus::Active, None, 0)).is_none());
    }

    #[test]
    fn test_usage_fresh_range() {
        let u = usage(&record(StaffStatus::Active, Some((1, 100)), 0)).unwrap();
        assert_eq!(u.used, 0);
        assert_eq!(u.remaining, 100);
        assert_eq!(u.capacity, 100);
        assert_eq!(u.percentage, 0.0);
    }

    #[test]
    fn test_usage_partially_used() {
        let u = usage(&record(StaffStatus::Active, Some((1001, 1200)), 1050)).unwrap();
        assert_eq!(u.used, 50);
        assert_eq!(u.remaining, 150);
        assert_eq!(u.percentage, 25.0);
    }

    #[test]
    fn test_usage_full_range() {
        let u = usage(&record(StaffStatus::Active, Some((1, 50)), 50)).unwrap();
        assert_eq!(u.used, 50);
        assert_eq!(u.remaining, 0);
        assert_eq!(u.percentage, 100.0);
    }

    #[test]
    fn test_summary_mixed_records() {
        let records = [
            record(StaffStatus::Active, Some((1, 100)), 50),
            record(StaffStatus::Terminated, Some((1, 50)), 50),
            record(StaffStatus::Pending, None, 0),
        ];

        let s = summary(&records);
        assert_eq!(s.active_staff, 1);
        assert_eq!(s.terminated_staff, 1);
        assert_eq!(s.total_serials_used, 100);
    }

    #[test]
    fn test_summary_empty() {
        let s = summary(&Vec::<staff::Model>::new());
        assert_eq!(s, UsageSummary::default());
    }

    #[test]
    fn test_format_usage_bar() {
        assert_eq!(format_usage_bar(100.0, Some(10)), "[██████████] 100.0%");
        assert_eq!(format_usage_bar(50.0, Some(10)), "[█████░░░░░] 50.0%");
        assert_eq!(format_usage_bar(0.0, None), "[░░░░░░░░░░] 0.0%");
    }

    #[tokio::test]
    async fn test_usage_report_integration() -> Result<()> {
        let db = setup_test_db().await?;
        create_active_staff(&db, "s1", 1, 10).await?;
        crate::core::staff::create_staff(&db, "s2", "Waiting").await?;
        let policy = test_retry_policy();
        for _ in 0..4 {
            issue_next(&db, &policy, "s1").await?;
        }

        let report = usage_report(&db).await?;
        assert_eq!(report.summary.active_staff, 1);
        assert_eq!(report.summary.terminated_staff, 0);
        assert_eq!(report.summary.total_serials_used, 4);
        assert_eq!(report.rows.len(), 2);

        let row = report.rows.iter().find(|r| r.staff.staff_id == "s1").unwrap();
        let u = row.usage.unwrap();
        assert_eq!(u.used, 4);
        assert_eq!(u.remaining, 6);

        let row = report.rows.iter().find(|r| r.staff.staff_id == "s2").unwrap();
        assert!(row.usage.is_none());

        Ok(())
    }
}
