//! Range allocation - validates and applies serial range edits for one staff member.
//!
//! A new range must be well-formed and must still contain the last serial issued, so
//! serials already printed on applications stay inside their owner's range. The check
//! runs against the cursor that the final conditional `UPDATE` is keyed on, never
//! against an older read, so an edit cannot slip past a concurrent issuance.
//!
//! Ranges of different staff members may overlap; nothing here compares them.

use crate::{
    core::{retry::RetryPolicy, staff as staff_store},
    entities::{Staff, staff},
    errors::{Error, Result},
};
use sea_orm::{prelude::*, sea_query::Expr};
use tracing::{debug, info, instrument, warn};

/// Range bounds exactly as they arrive from a request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeInput {
    pub start: String,
    pub end: String,
}

impl RangeInput {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Parses both bounds, see [`parse_serial`].
    pub fn parse(&self) -> Result<(i64, i64)> {
        Ok((parse_serial(&self.start)?, parse_serial(&self.end)?))
    }
}

/// Parses one serial bound: a whole number of at least 1, surrounding whitespace ignored.
pub fn parse_serial(value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| Error::InvalidNumber {
            value: value.to_string(),
        })
}

/// Checks a proposed range against the staff member's cursor.
///
/// Order matters: bad numbers first, then ordering, then usage.
pub fn validate_range(current_serial: i64, start: i64, end: i64) -> Result<()> {
    for bound in [start, end] {
        if bound < 1 {
            return Err(Error::InvalidNumber {
                value: bound.to_string(),
            });
        }
    }

    if start >= end {
        return Err(Error::InvalidOrder { start, end });
    }

    if current_serial > 0 && !(start..=end).contains(&current_serial) {
        return Err(Error::BelowUsage {
            start,
            end,
            current_serial,
        });
    }

    Ok(())
}

/// Replaces a staff member's range with `[start, end]`.
///
/// Setting the range the record already has succeeds without writing. On a lost race
/// the record is re-read and re-validated, so a concurrent issuance that moves the
/// cursor outside the new range turns into [`Error::BelowUsage`].
///
/// # Errors
/// [`Error::StaffNotFound`], the validation errors of [`validate_range`], or
/// [`Error::Contention`] once `policy` is used up.
#[instrument(skip(db, policy))]
pub async fn set_range<C>(
    db: &C,
    policy: &RetryPolicy,
    staff_id: &str,
    start: i64,
    end: i64,
) -> Result<staff::Model>
where
    C: ConnectionTrait,
{
    for attempt in 0..policy.max_attempts {
        let record = staff_store::require_staff(db, staff_id).await?;
        validate_range(record.current_serial, start, end)?;

        if record.range() == Some((start, end)) {
            debug!("Range unchanged");
            return Ok(record);
        }

        let now = chrono::Utc::now();
        let result = Staff::update_many()
            .col_expr(staff::Column::RangeStart, Expr::value(start))
            .col_expr(staff::Column::RangeEnd, Expr::value(end))
            .col_expr(staff::Column::UpdatedAt, Expr::value(now))
            .filter(staff::Column::StaffId.eq(staff_id))
            .filter(staff::Column::CurrentSerial.eq(record.current_serial))
            .exec(db)
            .await?;

        if result.rows_affected == 1 {
            info!(
                previous = ?record.range(),
                current_serial = record.current_serial,
                "Range updated"
            );
            return Ok(staff::Model {
                range_start: Some(start),
                range_end: Some(end),
                updated_at: now,
                ..record
            });
        }

        debug!(attempt, "Range update lost a race, retrying");
        if policy.has_attempts_after(attempt) {
            policy.backoff(attempt).await;
        }
    }

    warn!(attempts = policy.max_attempts, "Gave up updating range");
    Err(Error::Contention {
        staff_id: staff_id.to_string(),
        attempts: policy.max_attempts,
    })
}
