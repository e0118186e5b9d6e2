//! Export module for Potluck
//!
//! Exports a single group in several formats:
//! - JSON: machine-readable snapshot with schema versioning
//! - YAML: the same snapshot, human-readable
//! - CSV: expense shares, debts and settlement plan (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_debts_csv, export_expenses_csv};
pub use json::{export_group_json, GroupExport, MemberBalance, EXPORT_SCHEMA_VERSION};
pub use yaml::export_group_yaml;
