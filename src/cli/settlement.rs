//! Balance and settlement CLI commands

use crate::config::settings::Settings;
use crate::display::{format_balances, format_settle_outcome, format_settlement_plan};
use crate::error::PotluckResult;
use crate::services::{GroupService, ParticipantService};
use crate::storage::Storage;

use super::expense::parse_amount;

/// Record a payment that pays down a debt
pub fn handle_settle(
    storage: &Storage,
    settings: &Settings,
    group: &str,
    payer: &str,
    payee: &str,
    amount: &str,
) -> PotluckResult<()> {
    let amount = parse_amount(amount)?;
    let outcome = GroupService::new(storage).settle(group, payer, payee, amount)?;
    println!(
        "{}",
        format_settle_outcome(payer, payee, &outcome, &settings.currency_symbol)
    );
    Ok(())
}

/// Show what members owe and are owed
pub fn handle_balance(
    storage: &Storage,
    settings: &Settings,
    group: &str,
    participant: Option<&str>,
) -> PotluckResult<()> {
    let balances = GroupService::new(storage).balance(group, participant)?;
    let names = ParticipantService::new(storage).names()?;
    println!(
        "{}",
        format_balances(&balances, &names, &settings.currency_symbol)
    );
    Ok(())
}

/// Show the payments that would settle a group, without recording them
pub fn handle_simplify(storage: &Storage, settings: &Settings, group: &str) -> PotluckResult<()> {
    let plan = GroupService::new(storage).simplify(group)?;
    let names = ParticipantService::new(storage).names()?;
    println!(
        "{}",
        format_settlement_plan(&plan, &names, &settings.currency_symbol)
    );
    Ok(())
}

/// Record the settlement plan as paid
pub fn handle_settle_up(storage: &Storage, settings: &Settings, group: &str) -> PotluckResult<()> {
    let plan = GroupService::new(storage).settle_up(group)?;
    if plan.is_empty() {
        println!("Nothing to settle.");
        return Ok(());
    }

    let names = ParticipantService::new(storage).names()?;
    println!(
        "{}",
        format_settlement_plan(&plan, &names, &settings.currency_symbol)
    );
    println!("All debts in this group are now settled.");
    Ok(())
}
