//! Administrator operations - staff status transitions and range assignment.
//!
//! Every operation here requires an [`Role::Admin`](super::principal::Role::Admin)
//! principal and leaves an audit event behind once its change has committed.
//! Issuance is never triggered from here; only application intake issues serials.

use crate::{
    core::{
        audit,
        principal::Principal,
        range::{self, RangeInput},
        retry::RetryPolicy,
        staff as staff_store,
    },
    entities::{Staff, StaffStatus, staff},
    errors::{Error, Result},
};
use sea_orm::{prelude::*, sea_query::Expr};
use tracing::{debug, info, instrument, warn};

/// Whether the staff lifecycle allows moving from `from` to `to`.
///
/// `pending → active | rejected`, `active → terminated`, `terminated | rejected → active`.
#[must_use]
pub const fn is_legal_transition(from: StaffStatus, to: StaffStatus) -> bool {
    matches!(
        (from, to),
        (StaffStatus::Pending, StaffStatus::Active | StaffStatus::Rejected)
            | (StaffStatus::Active, StaffStatus::Terminated)
            | (StaffStatus::Terminated | StaffStatus::Rejected, StaffStatus::Active)
    )
}

/// Moves a staff member to a new status.
///
/// The write is keyed on the status that was checked, so two admins racing on the
/// same record cannot both apply a transition from the same starting point.
///
/// # Errors
/// [`Error::Unauthorized`], [`Error::StaffNotFound`], [`Error::IllegalTransition`]
/// (state unchanged), or [`Error::Contention`].
#[instrument(skip(db, policy, principal), fields(actor = %principal.id))]
pub async fn transition(
    db: &DatabaseConnection,
    policy: &RetryPolicy,
    principal: &Principal,
    staff_id: &str,
    to: StaffStatus,
) -> Result<staff::Model> {
    principal.require_admin("change staff status")?;

    for attempt in 0..policy.max_attempts {
        let record = staff_store::require_staff(db, staff_id).await?;
        let from = record.status;
        if !is_legal_transition(from, to) {
            return Err(Error::IllegalTransition { from, to });
        }

        let now = chrono::Utc::now();
        let result = Staff::update_many()
            .col_expr(staff::Column::Status, Expr::value(to.as_str()))
            .col_expr(staff::Column::UpdatedAt, Expr::value(now))
            .filter(staff::Column::StaffId.eq(staff_id))
            .filter(staff::Column::Status.eq(from))
            .exec(db)
            .await?;

        if result.rows_affected == 1 {
            info!(%from, %to, "Staff status changed");
            audit::record_event_best_effort(
                db,
                staff_id,
                &principal.id,
                "transition",
                format!("{from} -> {to}"),
            )
            .await;
            return Ok(staff::Model {
                status: to,
                updated_at: now,
                ..record
            });
        }

        debug!(attempt, "Status change lost a race, retrying");
        if policy.has_attempts_after(attempt) {
            policy.backoff(attempt).await;
        }
    }

    warn!(attempts = policy.max_attempts, "Gave up changing status");
    Err(Error::Contention {
        staff_id: staff_id.to_string(),
        attempts: policy.max_attempts,
    })
}

/// Assigns or edits a staff member's serial range from raw request input.
///
/// # Errors
/// [`Error::Unauthorized`] plus everything [`range::set_range`] can return.
#[instrument(skip(db, policy, principal), fields(actor = %principal.id))]
pub async fn assign_range(
    db: &DatabaseConnection,
    policy: &RetryPolicy,
    principal: &Principal,
    staff_id: &str,
    input: &RangeInput,
) -> Result<staff::Model> {
    principal.require_admin("assign serial ranges")?;
    let (start, end) = input.parse()?;

    let updated = range::set_range(db, policy, staff_id, start, end).await?;
    audit::record_event_best_effort(
        db,
        staff_id,
        &principal.id,
        "set_range",
        format!(
            "range {start}-{end}, last issued {}",
            updated.current_serial
        ),
    )
    .await;

    Ok(updated)
}
