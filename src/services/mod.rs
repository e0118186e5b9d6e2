//! Service layer for Potluck
//!
//! The service layer provides business logic on top of the storage layer,
//! resolving participants and groups by name, persisting changes, and
//! writing the audit trail.

pub mod group;
pub mod participant;

pub use group::{parse_share_arg, GroupService, ShareArg};
pub use participant::ParticipantService;
