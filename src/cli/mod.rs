//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod export;
pub mod expense;
pub mod group;
pub mod participant;
pub mod settlement;

pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use group::{handle_group_command, GroupCommands};
pub use participant::{handle_participant_command, ParticipantCommands};
pub use settlement::{handle_balance, handle_settle, handle_settle_up, handle_simplify};
