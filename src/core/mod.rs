//! Core business logic - framework-agnostic staff, range, serial and usage operations.
//!
//! Nothing in here knows about Discord. All shared state lives in the database and
//! every mutation of a staff row is a single conditional `UPDATE`, so any number of
//! request handlers can call these functions concurrently.

/// Administrator operations: status transitions and range assignment
pub mod admin;
/// Application intake: serial issuance, persistence and delivery
pub mod application;
/// Append-only audit trail of administrator actions
pub mod audit;
/// Caller identity and role
pub mod principal;
/// Range validation and conditional range updates
pub mod range;
/// Bounded backoff for conditional-update conflicts
pub mod retry;
/// Atomic serial issuance
pub mod serial;
/// Staff record store
pub mod staff;
/// Read-only usage rollups
pub mod usage;
