//! CLI command for exporting a group

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::error::{PotluckError, PotluckResult};
use crate::export::{export_debts_csv, export_expenses_csv, export_group_json, export_group_yaml};
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON (full group snapshot)
    Json,
    /// YAML (full group snapshot, human-readable)
    Yaml,
    /// CSV, one row per expense share
    Csv,
    /// CSV of outstanding debts and the settlement plan
    DebtsCsv,
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Group name or ID
    pub group: String,

    /// Export format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> PotluckResult<()> {
    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                PotluckError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        ExportFormat::Json => export_group_json(storage, &args.group, &mut writer, args.pretty)?,
        ExportFormat::Yaml => export_group_yaml(storage, &args.group, &mut writer)?,
        ExportFormat::Csv => export_expenses_csv(storage, &args.group, &mut writer)?,
        ExportFormat::DebtsCsv => export_debts_csv(storage, &args.group, &mut writer)?,
    }

    writer
        .flush()
        .map_err(|e| PotluckError::Export(e.to_string()))?;

    if let Some(path) = &args.output {
        println!("Exported {} to: {}", args.group, path.display());
    }

    Ok(())
}
