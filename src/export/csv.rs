//! CSV export
//!
//! Writes a group's expenses, outstanding debts and settlement plan as
//! spreadsheet-friendly rows. Amounts are plain decimals without a symbol.

use std::io::Write;

use crate::error::{PotluckError, PotluckResult};
use crate::export::json::GroupExport;
use crate::models::Money;
use crate::storage::Storage;

fn decimal(amount: Money) -> String {
    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}.{:02}", sign, amount.units().abs(), amount.cents_part())
}

/// Export a group's expenses to CSV, one row per expense share
pub fn export_expenses_csv<W: Write>(storage: &Storage, group: &str, writer: W) -> PotluckResult<()> {
    let export = GroupExport::from_storage(storage, group)?;
    let mut out = ::csv::Writer::from_writer(writer);

    out.write_record([
        "Expense ID",
        "Date",
        "Description",
        "Paid By",
        "Split",
        "Amount",
        "Participant",
        "Share",
    ])
    .map_err(|e| PotluckError::Export(e.to_string()))?;

    for expense in export.group.expenses() {
        for share in &expense.shares {
            out.write_record([
                expense.id.to_string(),
                expense.created_at.format("%Y-%m-%d").to_string(),
                expense.description.clone(),
                export.name_of(expense.paid_by),
                expense.split_policy.kind().to_string(),
                decimal(expense.amount),
                export.name_of(share.participant_id),
                decimal(share.amount),
            ])
            .map_err(|e| PotluckError::Export(e.to_string()))?;
        }
    }

    out.flush().map_err(|e| PotluckError::Export(e.to_string()))?;
    Ok(())
}

/// Export outstanding debts and the settlement plan to CSV
pub fn export_debts_csv<W: Write>(storage: &Storage, group: &str, writer: W) -> PotluckResult<()> {
    let export = GroupExport::from_storage(storage, group)?;
    let mut out = ::csv::Writer::from_writer(writer);

    out.write_record(["Kind", "From", "To", "Amount"])
        .map_err(|e| PotluckError::Export(e.to_string()))?;

    for entry in export.group.ledger().entries() {
        out.write_record([
            "debt".to_string(),
            export.name_of(entry.debtor),
            export.name_of(entry.creditor),
            decimal(entry.amount),
        ])
        .map_err(|e| PotluckError::Export(e.to_string()))?;
    }

    for transfer in &export.settlement_plan {
        out.write_record([
            "settlement".to_string(),
            export.name_of(transfer.from),
            export.name_of(transfer.to),
            decimal(transfer.amount),
        ])
        .map_err(|e| PotluckError::Export(e.to_string()))?;
    }

    out.flush().map_err(|e| PotluckError::Export(e.to_string()))?;
    Ok(())
}
