//! YAML export
//!
//! Same content as the JSON export, in a format that is easier to read.

use std::io::Write;

use crate::error::{PotluckError, PotluckResult};
use crate::export::json::GroupExport;
use crate::storage::Storage;

/// Export a group to YAML
pub fn export_group_yaml<W: Write>(storage: &Storage, group: &str, writer: &mut W) -> PotluckResult<()> {
    let export = GroupExport::from_storage(storage, group)?;

    writeln!(writer, "# Potluck group export: {}", export.group.name)
        .map_err(|e| PotluckError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| PotluckError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", export.app_version)
        .map_err(|e| PotluckError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PotluckError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| PotluckError::Export(e.to_string()))?;

    Ok(())
}
