//! Application intake - stamps a membership application with the next serial number.
//!
//! Intake validates the request, issues a serial against the submitting staff member's
//! range, stores the application and hands it to a [`DeliverySink`] for rendering and
//! emailing. A serial is consumed as soon as issuance commits; a later failure to store
//! or deliver the application does not give it back.

use crate::{
    config::settings::Settings,
    core::{principal::Principal, serial},
    entities::{Application, application},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use std::future::Future;
use tracing::{debug, error, info, instrument, warn};

/// Fields of a submitted application form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationInput {
    pub applicant_name: String,
    pub applicant_id_number: String,
    pub cover_plan: String,
    /// Paths returned by the blob store for uploaded photos and documents
    pub document_paths: Vec<String>,
}

impl ApplicationInput {
    /// Checks every field before any serial is spent.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("Applicant name", &self.applicant_name),
            ("ID number", &self.applicant_id_number),
            ("Cover plan", &self.cover_plan),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput {
                    message: format!("{label} cannot be empty"),
                });
            }
        }

        if self
            .applicant_id_number
            .trim()
            .chars()
            .any(|c| !c.is_ascii_alphanumeric())
        {
            return Err(Error::InvalidInput {
                message: "ID number may only contain letters and digits".to_string(),
            });
        }

        if self
            .document_paths
            .iter()
            .any(|path| path.trim().is_empty() || path.contains('\n'))
        {
            return Err(Error::InvalidInput {
                message: "Document paths must be non-empty single lines".to_string(),
            });
        }

        Ok(())
    }
}

/// Renders an application (PDF) and delivers it (email). Transport is the sink's business.
pub trait DeliverySink: Send + Sync {
    /// Delivers one stored application.
    fn deliver(
        &self,
        application: &application::Model,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Sink that only records the hand-off in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDeliverySink;

impl DeliverySink for LogDeliverySink {
    fn deliver(
        &self,
        application: &application::Model,
    ) -> impl Future<Output = Result<()>> + Send {
        info!(
            serial = %application.serial_number,
            staff_id = %application.staff_id,
            documents = application.document_paths().count(),
            "Application handed to delivery"
        );
        std::future::ready(Ok(()))
    }
}

/// Submits an application on behalf of the staff member `principal`.
///
/// # Errors
/// [`Error::InvalidInput`] before anything is written, then whatever
/// [`serial::issue_next`] returns for the principal's staff record.
#[instrument(skip_all, fields(staff_id = %principal.id))]
pub async fn submit_application<S>(
    db: &DatabaseConnection,
    settings: &Settings,
    sink: &S,
    principal: &Principal,
    input: ApplicationInput,
) -> Result<application::Model>
where
    S: DeliverySink,
{
    input.validate()?;

    let issued = serial::issue_next(db, &settings.retry, &principal.id).await?;
    let serial_number = settings.serial.format(&principal.id, issued);

    let record = application::ActiveModel {
        serial_number: Set(serial_number.clone()),
        serial_value: Set(issued.value()),
        staff_id: Set(principal.id.clone()),
        applicant_name: Set(input.applicant_name.trim().to_string()),
        applicant_id_number: Set(input.applicant_id_number.trim().to_string()),
        cover_plan: Set(input.cover_plan.trim().to_string()),
        document_paths: Set(input
            .document_paths
            .iter()
            .map(|path| path.trim())
            .collect::<Vec<_>>()
            .join("\n")),
        delivered: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let stored = record
        .insert(db)
        .await
        .inspect_err(|e| {
            error!(%serial_number, "Serial issued but application not stored: {e}");
        })?;

    let delivered = deliver(db, sink, &stored).await;
    Ok(application::Model {
        delivered,
        ..stored
    })
}

/// Marks an undelivered application as taken by this caller.
///
/// Keyed on `delivered = false`, so only one concurrent delivery wins the row.
async fn claim(db: &DatabaseConnection, id: i64) -> Result<bool> {
    let result = Application::update_many()
        .col_expr(application::Column::Delivered, Expr::value(true))
        .filter(application::Column::Id.eq(id))
        .filter(application::Column::Delivered.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected == 1)
}

/// Hands a claimed application back so a later redelivery can pick it up.
async fn release(db: &DatabaseConnection, id: i64) -> Result<()> {
    Application::update_many()
        .col_expr(application::Column::Delivered, Expr::value(false))
        .filter(application::Column::Id.eq(id))
        .exec(db)
        .await?;
    Ok(())
}

/// Claims a stored application, hands it to the sink and releases the claim on failure.
///
/// Returns whether this caller delivered it. Failures are logged; the application
/// stays undelivered for a later retry.
async fn deliver<S>(db: &DatabaseConnection, sink: &S, stored: &application::Model) -> bool
where
    S: DeliverySink,
{
    match claim(db, stored.id).await {
        Ok(true) => {}
        Ok(false) => {
            debug!(serial = %stored.serial_number, "Already claimed by another delivery");
            return false;
        }
        Err(e) => {
            warn!(serial = %stored.serial_number, "Could not claim for delivery: {e}");
            return false;
        }
    }

    let Err(e) = sink.deliver(stored).await else {
        return true;
    };

    warn!(serial = %stored.serial_number, "Delivery failed: {e}");
    if let Err(e) = release(db, stored.id).await {
        error!(serial = %stored.serial_number, "Delivery failed and claim not released: {e}");
    }
    false
}

/// Retries delivery for every application still flagged undelivered.
///
/// Returns how many were delivered by this call. Concurrent calls never deliver the
/// same application twice.
pub async fn redeliver_pending<S>(db: &DatabaseConnection, sink: &S) -> Result<usize>
where
    S: DeliverySink,
{
    let pending = Application::find()
        .filter(application::Column::Delivered.eq(false))
        .order_by_asc(application::Column::Id)
        .all(db)
        .await?;

    let mut delivered = 0;
    for stored in &pending {
        if deliver(db, sink, stored).await {
            delivered += 1;
        }
    }

    Ok(delivered)
}

/// Returns a staff member's applications, highest serial first.
pub async fn list_applications_for_staff(
    db: &DatabaseConnection,
    staff_id: &str,
) -> Result<Vec<application::Model>> {
    Application::find()
        .filter(application::Column::StaffId.eq(staff_id))
        .order_by_desc(application::Column::SerialValue)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an application by its formatted serial number.
pub async fn get_application_by_serial(
    db: &DatabaseConnection,
    serial_number: &str,
) -> Result<Option<application::Model>> {
    Application::find()
        .filter(application::Column::SerialNumber.eq(serial_number))
        .one(db)
        .await
        .map_err(Into::into)
}
