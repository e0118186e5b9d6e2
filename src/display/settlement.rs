//! Balance and settlement display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{name_of, Names};
use crate::models::{Balance, ParticipantId, SettleOutcome, SettlementPlanner, SettlementTransfer};

#[derive(Tabled)]
struct BalanceRow {
    #[tabled(rename = "Participant")]
    participant: String,
    #[tabled(rename = "Owes")]
    owes: String,
    #[tabled(rename = "Is Owed")]
    owed_to: String,
    #[tabled(rename = "Net")]
    net: String,
}

#[derive(Tabled)]
struct TransferRow {
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format per-participant balances
pub fn format_balances(balances: &[(ParticipantId, Balance)], names: &Names, symbol: &str) -> String {
    if balances.is_empty() {
        return "No balances.".to_string();
    }

    let rows = balances.iter().map(|(id, balance)| BalanceRow {
        participant: name_of(names, *id),
        owes: balance.owes.format_with_symbol(symbol),
        owed_to: balance.owed_to.format_with_symbol(symbol),
        net: balance.net().format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// Format a settlement plan with its total
pub fn format_settlement_plan(plan: &[SettlementTransfer], names: &Names, symbol: &str) -> String {
    if plan.is_empty() {
        return "Everyone is settled up.".to_string();
    }

    let rows = plan.iter().map(|t| TransferRow {
        from: name_of(names, t.from),
        to: name_of(names, t.to),
        amount: t.amount.format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!(
        "{}\n{} payment(s), {} in total",
        table,
        plan.len(),
        SettlementPlanner::total(plan).format_with_symbol(symbol)
    )
}

/// One-line summary of a recorded settlement
pub fn format_settle_outcome(
    payer: &str,
    payee: &str,
    outcome: &SettleOutcome,
    symbol: &str,
) -> String {
    let mut line = format!(
        "{} paid {} {}",
        payer,
        payee,
        outcome.applied.format_with_symbol(symbol)
    );
    if outcome.absorbed.is_positive() {
        line.push_str(&format!(
            " ({} more than was owed was ignored)",
            outcome.absorbed.format_with_symbol(symbol)
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IdProvider, Money, SequentialIdProvider};

    #[test]
    fn test_plan_shows_names_and_total() {
        let ids = SequentialIdProvider::new();
        let (a, b, c) = (ids.participant_id(), ids.participant_id(), ids.participant_id());
        let names = Names::from([
            (a, "Alice".to_string()),
            (b, "Bob".to_string()),
            (c, "Carol".to_string()),
        ]);
        let plan = vec![
            SettlementTransfer { from: a, to: c, amount: Money::from_units(150) },
            SettlementTransfer { from: b, to: c, amount: Money::from_units(50) },
        ];

        let output = format_settlement_plan(&plan, &names, "$");
        assert!(output.contains("Alice"));
        assert!(output.contains("Carol"));
        assert!(output.contains("2 payment(s), $200.00 in total"));
        assert_eq!(format_settlement_plan(&[], &names, "$"), "Everyone is settled up.");
    }

    #[test]
    fn test_balances_show_net() {
        let id = SequentialIdProvider::new().participant_id();
        let balance = Balance {
            owes: Money::from_units(350),
            owed_to: Money::from_units(200),
        };
        let output = format_balances(&[(id, balance)], &Names::new(), "$");
        assert!(output.contains("-$150.00"));
        assert!(output.contains("par-00000000"));
    }

    #[test]
    fn test_settle_outcome_mentions_overpayment() {
        let outcome = SettleOutcome {
            applied: Money::from_units(50),
            absorbed: Money::from_units(20),
        };
        assert_eq!(
            format_settle_outcome("Bob", "Alice", &outcome, "$"),
            "Bob paid Alice $50.00 ($20.00 more than was owed was ignored)"
        );
    }
}
