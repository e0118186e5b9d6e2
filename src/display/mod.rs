//! Display formatting for terminal output
//!
//! Renders participants, groups, expenses, balances and settlement plans as
//! tables. Participant IDs are shown by name wherever the registry knows them.

pub mod group;
pub mod participant;
pub mod settlement;

use std::collections::HashMap;

use crate::models::ParticipantId;

pub use group::{format_expense_list, format_group_details, format_group_list, format_ledger};
pub use participant::format_participant_list;
pub use settlement::{format_balances, format_settle_outcome, format_settlement_plan};

/// Display names keyed by participant ID
pub type Names = HashMap<ParticipantId, String>;

/// Name for an ID, falling back to the short ID when unregistered
pub(crate) fn name_of(names: &Names, id: ParticipantId) -> String {
    names.get(&id).cloned().unwrap_or_else(|| id.to_string())
}
