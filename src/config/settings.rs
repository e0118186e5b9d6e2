//! User settings for Potluck
//!
//! Display and behaviour preferences persisted as `config.json`.

use serde::{Deserialize, Serialize};

use super::paths::PotluckPaths;
use crate::error::PotluckError;
use crate::models::SplitKind;

/// User settings for Potluck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Whether mutations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Split policy used when `expense add` is given no `--split`
    #[serde(default)]
    pub default_split_policy: SplitKind,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            audit_enabled: default_audit_enabled(),
            default_split_policy: SplitKind::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &PotluckPaths) -> Result<Self, PotluckError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not saved yet; the caller decides when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PotluckError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| PotluckError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PotluckPaths) -> Result<(), PotluckError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PotluckError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PotluckError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
