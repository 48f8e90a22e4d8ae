//! Serial issuance - hands out the next serial number from a staff member's range.
//!
//! Issuance is an optimistic compare-and-swap on the staff row: read the record, work
//! out the candidate, then `UPDATE staff SET current_serial = candidate` guarded by the
//! status, cursor and range that were read. The update either matches exactly one row
//! (the serial is ours) or none (someone else moved first, so re-read and try again).
//! Different staff members never touch the same row and never wait on each other.

use crate::{
    core::{retry::RetryPolicy, staff as staff_store},
    entities::{Staff, StaffStatus, staff},
    errors::{Error, Result},
};
use sea_orm::{prelude::*, sea_query::Expr};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// How serial numbers are printed: `{prefix}{value}` with the value zero-padded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerialFormat {
    pub prefix: String,
    /// Minimum number of digits
    pub width: usize,
}

impl Default for SerialFormat {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            width: 6,
        }
    }
}

impl SerialFormat {
    /// Renders a staff member's serial, e.g. `FS-s1-000042`.
    ///
    /// Ranges of different staff may overlap, so the staff ID is part of the number.
    /// The value is always the digits after the last `-`, which keeps the rendering
    /// unique per `(staff_id, value)`.
    #[must_use]
    pub fn format(&self, staff_id: &str, serial: SerialNumber) -> String {
        format!(
            "{}{staff_id}-{:0width$}",
            self.prefix,
            serial.0,
            width = self.width
        )
    }
}

/// A serial number issued to exactly one application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SerialNumber(pub i64);

impl SerialNumber {
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a single issuance attempt intends to write, and the state it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssuePlan {
    pub candidate: i64,
    pub previous: i64,
    pub range_start: i64,
    pub range_end: i64,
}

/// Works out the next serial for a staff record without touching the store.
///
/// The candidate is `range_start` for a fresh cursor and `current_serial + 1` otherwise.
pub fn plan_issue(record: &staff::Model) -> Result<IssuePlan> {
    if record.status != StaffStatus::Active {
        return Err(Error::StaffNotActive {
            staff_id: record.staff_id.clone(),
            status: record.status,
        });
    }

    let Some((range_start, range_end)) = record.range() else {
        return Err(Error::NoRangeAssigned {
            staff_id: record.staff_id.clone(),
        });
    };

    let exhausted = || Error::RangeExhausted {
        staff_id: record.staff_id.clone(),
        range_end,
    };

    let candidate = if record.current_serial == 0 {
        range_start
    } else {
        record.current_serial.checked_add(1).ok_or_else(exhausted)?
    };

    if candidate > range_end {
        return Err(exhausted());
    }

    Ok(IssuePlan {
        candidate,
        previous: record.current_serial,
        range_start,
        range_end,
    })
}

/// Commits a plan if the row still looks exactly like it did when the plan was made.
///
/// Returns whether this caller won the row.
async fn try_commit<C>(db: &C, staff_id: &str, plan: IssuePlan) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Staff::update_many()
        .col_expr(staff::Column::CurrentSerial, Expr::value(plan.candidate))
        .col_expr(staff::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
        .filter(staff::Column::StaffId.eq(staff_id))
        .filter(staff::Column::Status.eq(StaffStatus::Active))
        .filter(staff::Column::CurrentSerial.eq(plan.previous))
        .filter(staff::Column::RangeStart.eq(plan.range_start))
        .filter(staff::Column::RangeEnd.eq(plan.range_end))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Issues the next serial number for a staff member.
///
/// # Errors
/// - [`Error::StaffNotFound`], [`Error::StaffNotActive`], [`Error::NoRangeAssigned`]
///   when the staff record cannot issue at all
/// - [`Error::RangeExhausted`] once `range_end` has been handed out; never retried
/// - [`Error::Contention`] when every attempt in `policy` lost its race. The caller must
///   re-read the record to learn whether any serial was consumed.
#[instrument(skip(db, policy))]
pub async fn issue_next<C>(db: &C, policy: &RetryPolicy, staff_id: &str) -> Result<SerialNumber>
where
    C: ConnectionTrait,
{
    for attempt in 0..policy.max_attempts {
        let record = staff_store::require_staff(db, staff_id).await?;
        let plan = plan_issue(&record)?;

        if try_commit(db, staff_id, plan).await? {
            info!(serial = plan.candidate, attempt, "Issued serial");
            return Ok(SerialNumber(plan.candidate));
        }

        debug!(attempt, candidate = plan.candidate, "Serial claim lost a race, retrying");
        if policy.has_attempts_after(attempt) {
            policy.backoff(attempt).await;
        }
    }

    warn!(attempts = policy.max_attempts, "Gave up issuing serial");
    Err(Error::Contention {
        staff_id: staff_id.to_string(),
        attempts: policy.max_attempts,
    })
}
