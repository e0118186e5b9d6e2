//! Group display formatting
//!
//! Formats groups, their expense history and their pairwise debts.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{name_of, Names};
use crate::models::{Group, Ledger};

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Members")]
    members: usize,
    #[tabled(rename = "Expenses")]
    expenses: usize,
    #[tabled(rename = "Total Spent")]
    total: String,
    #[tabled(rename = "Outstanding")]
    outstanding: String,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Paid By")]
    paid_by: String,
    #[tabled(rename = "Split")]
    split: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Shares")]
    shares: String,
}

#[derive(Tabled)]
struct DebtRow {
    #[tabled(rename = "Debtor")]
    debtor: String,
    #[tabled(rename = "Creditor")]
    creditor: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format a list of groups as a table
pub fn format_group_list(groups: &[Group], symbol: &str) -> String {
    if groups.is_empty() {
        return "No groups found.".to_string();
    }

    let rows = groups.iter().map(|g| GroupRow {
        name: g.name.clone(),
        id: g.id.to_string(),
        members: g.members().len(),
        expenses: g.expenses().len(),
        total: g.total_spent().format_with_symbol(symbol),
        outstanding: g.ledger().total_outstanding().format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format a group's expense history, oldest first
pub fn format_expense_list(group: &Group, names: &Names, symbol: &str) -> String {
    if group.expenses().is_empty() {
        return format!("No expenses recorded in {}.", group.name);
    }

    let rows = group.expenses().iter().map(|e| ExpenseRow {
        date: e.created_at.format("%Y-%m-%d").to_string(),
        description: e.description.clone(),
        paid_by: name_of(names, e.paid_by),
        split: e.split_policy.kind().to_string(),
        amount: e.amount.format_with_symbol(symbol),
        shares: e
            .shares
            .iter()
            .filter(|s| !s.amount.is_zero())
            .map(|s| format!("{} {}", name_of(names, s.participant_id), s.amount.format_with_symbol(symbol)))
            .collect::<Vec<_>>()
            .join(", "),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format the outstanding pairwise debts
pub fn format_ledger(ledger: &Ledger, names: &Names, symbol: &str) -> String {
    if ledger.is_empty() {
        return "No outstanding debts.".to_string();
    }

    let rows = ledger.entries().map(|entry| DebtRow {
        debtor: name_of(names, entry.debtor),
        creditor: name_of(names, entry.creditor),
        amount: entry.amount.format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format a single group's details
pub fn format_group_details(group: &Group, names: &Names, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Group: {}\n", group.name));
    output.push_str(&format!("  ID:          {}\n", group.id));
    output.push_str(&format!(
        "  Created:     {}\n",
        group.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!(
        "  Members:     {}\n",
        group
            .members()
            .iter()
            .map(|&id| name_of(names, id))
            .collect::<Vec<_>>()
            .join(", ")
    ));
    output.push_str(&format!("  Expenses:    {}\n", group.expenses().len()));
    output.push_str(&format!(
        "  Total Spent: {}\n",
        group.total_spent().format_with_symbol(symbol)
    ));

    output.push_str("\nDebts:\n");
    output.push_str(&format_ledger(group.ledger(), names, symbol));
    output.push('\n');

    output
}
