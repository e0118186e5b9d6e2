//! Audit logging system for Potluck
//!
//! Every mutation (participants registered, groups created, expenses added,
//! debts settled) is appended to a line-delimited JSON log together with a
//! snapshot of the affected entity.
//!
//! - `AuditEntry`: one log line: timestamp, operation, entity, snapshots.
//! - `AuditLogger`: appends entries to the log file and reads them back.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
