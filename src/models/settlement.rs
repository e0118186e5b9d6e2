//! Settlement planning
//!
//! Reduces a web of pairwise debts to a list of payments that brings every
//! participant's net position to zero.

use serde::{Deserialize, Serialize};

use super::ids::ParticipantId;
use super::ledger::Ledger;
use super::money::Money;

/// A recommended payment from one participant to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementTransfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

/// Greedy debtor/creditor matcher
///
/// Net positions are matched head-to-head in member order: the first debtor
/// pays the first creditor as much as both can absorb, and whichever side is
/// exhausted moves on to the next participant. The result clears every debt
/// but is not guaranteed to use the fewest possible transfers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettlementPlanner;

impl SettlementPlanner {
    /// Build a settlement plan for `members` from the debts in `ledger`
    pub fn plan(members: &[ParticipantId], ledger: &Ledger) -> Vec<SettlementTransfer> {
        let nets = members
            .iter()
            .map(|&id| (id, ledger.net_position(id).net()));
        Self::plan_from_nets(nets)
    }

    /// Build a settlement plan from precomputed net positions
    ///
    /// Positive nets are creditors, negative nets are debtors, zeros are
    /// skipped. Iteration order of `nets` decides the pairing.
    pub fn plan_from_nets<I>(nets: I) -> Vec<SettlementTransfer>
    where
        I: IntoIterator<Item = (ParticipantId, Money)>,
    {
        let mut creditors: Vec<(ParticipantId, Money)> = Vec::new();
        let mut debtors: Vec<(ParticipantId, Money)> = Vec::new();
        for (id, net) in nets {
            if net.is_positive() {
                creditors.push((id, net));
            } else if net.is_negative() {
                debtors.push((id, -net));
            }
        }

        let mut transfers = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < debtors.len() && j < creditors.len() {
            let (debtor, debt) = debtors[i];
            let (creditor, credit) = creditors[j];
            let amount = debt.min(credit);

            transfers.push(SettlementTransfer {
                from: debtor,
                to: creditor,
                amount,
            });

            debtors[i].1 -= amount;
            creditors[j].1 -= amount;
            if debtors[i].1.is_zero() {
                i += 1;
            }
            if creditors[j].1.is_zero() {
                j += 1;
            }
        }

        transfers
    }

    /// Total money moved by a plan
    pub fn total(transfers: &[SettlementTransfer]) -> Money {
        transfers.iter().map(|t| t.amount).sum()
    }
}
