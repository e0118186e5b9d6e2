//! Path management for Potluck
//!
//! ## Path Resolution Order
//!
//! 1. `POTLUCK_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory for "potluck" (via `directories`),
//!    e.g. `~/.config/potluck` on Linux

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::PotluckError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "POTLUCK_DATA_DIR";

/// Manages all paths used by Potluck
#[derive(Debug, Clone)]
pub struct PotluckPaths {
    base_dir: PathBuf,
}

impl PotluckPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PotluckError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "potluck")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    PotluckError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create PotluckPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn participants_file(&self) -> PathBuf {
        self.data_dir().join("participants.json")
    }

    pub fn groups_file(&self) -> PathBuf {
        self.data_dir().join("groups.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), PotluckError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PotluckError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| PotluckError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PotluckPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.groups_file(),
            temp_dir.path().join("data").join("groups.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PotluckPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().exists());
    }
}
