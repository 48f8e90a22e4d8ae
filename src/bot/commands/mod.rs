//! Discord command implementations organized by audience.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Administrator commands: staff lifecycle, ranges, usage
pub mod admin;

/// Application submission and history
pub mod application;

/// General utility commands
pub mod general;

/// Staff self-service commands
pub mod staff;

// Export commands
pub use admin::*;
pub use application::*;
pub use general::*;
pub use staff::*;
