//! Core data models for Potluck
//!
//! This module contains the accounting core: participants, expenses and the
//! split policies that divide them, the pairwise debt ledger, the settlement
//! planner, and the group aggregate tying them together. Nothing in here
//! touches the filesystem.

pub mod expense;
pub mod group;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod participant;
pub mod percentage;
pub mod settlement;
pub mod split;

pub use expense::Expense;
pub use group::{Group, NewExpense};
pub use ids::{ExpenseId, GroupId, IdProvider, ParticipantId, SequentialIdProvider, UuidIdProvider};
pub use ledger::{Balance, Ledger, LedgerEntry, SettleOutcome};
pub use money::Money;
pub use participant::Participant;
pub use percentage::Percentage;
pub use settlement::{SettlementPlanner, SettlementTransfer};
pub use split::{Share, SplitKind, SplitPolicy};
