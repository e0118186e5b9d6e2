//! Expense CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_expense_list;
use crate::error::{PotluckError, PotluckResult};
use crate::models::{Money, SplitKind};
use crate::services::{parse_share_arg, GroupService, ParticipantService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense paid by one member
    Add {
        /// Group name or ID
        group: String,
        /// What the money was spent on
        description: String,
        /// Amount, e.g. 12.50 or $12.50
        amount: String,
        /// Who paid
        #[arg(short, long)]
        paid_by: String,
        /// Split policy: equal, exact or percent (defaults to the configured policy)
        #[arg(short, long)]
        split: Option<SplitKind>,
        /// Share as name=value; an amount for exact, a percentage for percent
        #[arg(long = "share")]
        shares: Vec<String>,
    },
    /// List a group's expenses
    List {
        /// Group name or ID
        group: String,
    },
}

/// Parse a command-line amount
pub(crate) fn parse_amount(input: &str) -> PotluckResult<Money> {
    Money::parse(input).map_err(|e| PotluckError::InvalidAmount(e.to_string()))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> PotluckResult<()> {
    let service = GroupService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            group,
            description,
            amount,
            paid_by,
            split,
            shares,
        } => {
            let amount = parse_amount(&amount)?;
            let shares = shares
                .iter()
                .map(|s| parse_share_arg(s))
                .collect::<PotluckResult<Vec<_>>>()?;

            // Share values imply a policy when none was configured explicitly
            let kind = match split {
                Some(kind) => kind,
                None if !shares.is_empty() && settings.default_split_policy == SplitKind::Equal => {
                    return Err(PotluckError::Validation(
                        "--share needs --split exact or --split percent".into(),
                    ));
                }
                None => settings.default_split_policy,
            };

            let policy = service.build_policy(kind, &shares)?;
            let expense = service.add_expense(&group, &description, amount, &paid_by, policy)?;

            let names = ParticipantService::new(storage).names()?;
            println!(
                "Recorded expense: {} ({}, {} split)",
                expense.description,
                expense.amount.format_with_symbol(symbol),
                expense.split_policy.kind()
            );
            for share in expense.shares.iter().filter(|s| !s.amount.is_zero()) {
                println!(
                    "  {:20} {:>12}",
                    names
                        .get(&share.participant_id)
                        .cloned()
                        .unwrap_or_else(|| share.participant_id.to_string()),
                    share.amount.format_with_symbol(symbol)
                );
            }
        }

        ExpenseCommands::List { group } => {
            let group = service.require(&group)?;
            let names = ParticipantService::new(storage).names()?;
            println!("{}", format_expense_list(&group, &names, symbol));
            if !group.expenses().is_empty() {
                println!(
                    "\nTotal: {} expenses, {}",
                    group.expenses().len(),
                    group.total_spent().format_with_symbol(symbol)
                );
            }
        }
    }

    Ok(())
}
