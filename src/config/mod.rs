//! Configuration module for Potluck
//!
//! - Path resolution for settings, data files and the audit log
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PotluckPaths;
pub use settings::Settings;
