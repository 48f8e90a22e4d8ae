//! Unified error type for every layer of the crate.
//!
//! Range-edit, issuance and transition failures each get their own variant so callers
//! can match on them; [`Error::code`] gives the UI a stable key to localize.

use crate::entities::staff::StaffStatus;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("'{value}' is not a valid serial number (whole number of at least 1)")]
    InvalidNumber { value: String },

    #[error("Range start {start} must be lower than range end {end}")]
    InvalidOrder { start: i64, end: i64 },

    #[error("Range {start}-{end} does not contain serial {current_serial}, which is already issued")]
    BelowUsage {
        start: i64,
        end: i64,
        current_serial: i64,
    },

    #[error("Staff member '{staff_id}' not found")]
    StaffNotFound { staff_id: String },

    #[error("Staff member '{staff_id}' already exists")]
    StaffExists { staff_id: String },

    #[error("Staff member '{staff_id}' is {status}, not active")]
    StaffNotActive {
        staff_id: String,
        status: StaffStatus,
    },

    #[error("Staff member '{staff_id}' has no serial range assigned")]
    NoRangeAssigned { staff_id: String },

    #[error("Serial range for '{staff_id}' is exhausted (last serial {range_end})")]
    RangeExhausted { staff_id: String, range_end: i64 },

    #[error("Cannot move a staff member from {from} to {to}")]
    IllegalTransition { from: StaffStatus, to: StaffStatus },

    #[error("Gave up updating '{staff_id}' after {attempts} conflicting attempts")]
    Contention { staff_id: String, attempts: u32 },

    #[error("'{principal_id}' is not allowed to {action}")]
    Unauthorized {
        principal_id: String,
        action: &'static str,
    },

    #[error("Delivery failed: {message}")]
    Delivery { message: String },
}

impl Error {
    /// Stable message key for the UI's translation tables.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } | Self::EnvVar(_) | Self::Io(_) => "system.config",
            Self::Database(_) => "system.database",
            Self::Fmt(_) | Self::Framework(_) => "system.internal",
            Self::InvalidInput { .. } => "input.invalid",
            Self::InvalidNumber { .. } => "range.invalid_number",
            Self::InvalidOrder { .. } => "range.invalid_order",
            Self::BelowUsage { .. } => "range.below_usage",
            Self::StaffNotFound { .. } => "staff.not_found",
            Self::StaffExists { .. } => "staff.exists",
            Self::StaffNotActive { .. } => "serial.staff_not_active",
            Self::NoRangeAssigned { .. } => "serial.no_range",
            Self::RangeExhausted { .. } => "serial.range_exhausted",
            Self::IllegalTransition { .. } => "staff.illegal_transition",
            Self::Contention { .. } => "system.contention",
            Self::Unauthorized { .. } => "auth.unauthorized",
            Self::Delivery { .. } => "delivery.failed",
        }
    }

    /// Whether the error describes something the caller can act on, as opposed to
    /// an infrastructure failure that should be logged and reported generically.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            Self::Config { .. }
                | Self::Database(_)
                | Self::Io(_)
                | Self::EnvVar(_)
                | Self::Fmt(_)
                | Self::Framework(_)
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
