//! Potluck - shared expense tracking with debt simplification
//!
//! This library provides the core functionality for the Potluck expense
//! splitter. Participants form groups, record expenses paid by one member
//! and split among the others, and settle the resulting debts with as few
//! payments as the greedy planner finds.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Money, split policies, the ledger, the settlement planner and
//!   the group aggregate
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `display`: Table formatting for the terminal
//! - `export`: JSON, YAML and CSV exports
//! - `cli`: Command handlers for the `potluck` binary
//!
//! # Example
//!
//! ```rust
//! use potluck::models::{Group, IdProvider, Money, NewExpense, SequentialIdProvider, SplitPolicy};
//!
//! let ids = SequentialIdProvider::new();
//! let (alice, bob) = (ids.participant_id(), ids.participant_id());
//! let mut group = Group::new(&ids, "Dinner club", vec![alice, bob]).unwrap();
//!
//! group
//!     .add_expense(&ids, NewExpense::new("Pizza", Money::from_cents(3000), alice, SplitPolicy::Equal))
//!     .unwrap();
//!
//! assert_eq!(group.user_balance(bob).owes, Money::from_cents(1500));
//! assert_eq!(group.simplify_balances().len(), 1);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::PotluckError;
