//! Pairwise debt ledger
//!
//! Tracks how much each participant owes each other participant within a
//! group. Debts are directional: `A -> B` and `B -> A` are separate entries
//! and are never netted against each other when written. Netting happens only
//! when positions are computed for settlement planning.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::expense::Expense;
use super::ids::ParticipantId;
use super::money::Money;
use crate::error::{PotluckError, PotluckResult};

/// One directional debt: `debtor` owes `creditor` the given amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub debtor: ParticipantId,
    pub creditor: ParticipantId,
    pub amount: Money,
}

/// What a participant owes and is owed across the whole group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
    /// Total this participant owes to others
    pub owes: Money,
    /// Total others owe to this participant
    pub owed_to: Money,
}

impl Balance {
    /// Net position: positive means the participant should receive money
    pub fn net(&self) -> Money {
        self.owed_to - self.owes
    }
}

/// Result of settling a debt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleOutcome {
    /// Amount that actually reduced the debt
    pub applied: Money,
    /// Overpayment beyond the outstanding debt, dropped rather than carried over
    pub absorbed: Money,
}

/// Directional pairwise debts within a group
///
/// Invariants: every stored amount is strictly positive, nobody owes
/// themselves, and the sum of all entries fits in a [`Money`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LedgerEntry>", into = "Vec<LedgerEntry>")]
pub struct Ledger {
    debts: BTreeMap<(ParticipantId, ParticipantId), Money>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book an expense: every non-payer share becomes a debt to the payer
    ///
    /// # Errors
    ///
    /// `InvalidAmount` if the ledger total would overflow. Nothing is booked
    /// in that case.
    pub fn apply_expense(&mut self, expense: &Expense) -> PotluckResult<()> {
        Money::checked_sum(expense.obligations().map(|s| s.amount))
            .and_then(|incoming| self.total_outstanding().checked_add(incoming))
            .ok_or_else(|| {
                PotluckError::InvalidAmount(format!(
                    "booking {} would push the group's debts past {}",
                    expense.amount,
                    Money::MAX
                ))
            })?;

        for share in expense.obligations() {
            self.add_debt(share.participant_id, expense.paid_by, share.amount);
        }
        Ok(())
    }

    /// Pay down the debt `payer -> payee`
    ///
    /// Paying more than is owed clears the entry; the excess is reported in
    /// [`SettleOutcome::absorbed`] and does not create a reverse debt.
    ///
    /// # Errors
    ///
    /// `NoOutstandingBalance` if `payer` owes `payee` nothing.
    pub fn settle(
        &mut self,
        payer: ParticipantId,
        payee: ParticipantId,
        amount: Money,
    ) -> PotluckResult<SettleOutcome> {
        let owed = self
            .debts
            .get_mut(&(payer, payee))
            .ok_or_else(|| PotluckError::NoOutstandingBalance {
                payer: payer.to_string(),
                payee: payee.to_string(),
            })?;

        let outstanding = *owed;
        *owed -= amount;
        if !owed.is_positive() {
            self.debts.remove(&(payer, payee));
            Ok(SettleOutcome {
                applied: outstanding,
                absorbed: amount - outstanding,
            })
        } else {
            Ok(SettleOutcome {
                applied: amount,
                absorbed: Money::ZERO,
            })
        }
    }

    /// Record a payment made from `payer` to `payee`
    ///
    /// The payment first reduces whatever `payer` owes `payee`; anything left
    /// over becomes a debt from `payee` back to `payer`. Unlike [`settle`],
    /// this never fails and never loses money, so net positions move by
    /// exactly `amount`.
    ///
    /// [`settle`]: Ledger::settle
    pub fn record_payment(&mut self, payer: ParticipantId, payee: ParticipantId, amount: Money) {
        if payer == payee || !amount.is_positive() {
            return;
        }

        let owed = self.amount_owed(payer, payee);
        if amount < owed {
            self.debts.insert((payer, payee), owed - amount);
            return;
        }

        self.debts.remove(&(payer, payee));
        let excess = amount - owed;
        if excess.is_positive() {
            self.add_debt(payee, payer, excess);
        }
    }

    /// What a participant owes and is owed
    pub fn net_position(&self, participant: ParticipantId) -> Balance {
        self.debts
            .iter()
            .fold(Balance::default(), |mut balance, (&(debtor, creditor), &amount)| {
                if debtor == participant {
                    balance.owes += amount;
                }
                if creditor == participant {
                    balance.owed_to += amount;
                }
                balance
            })
    }

    /// Amount `debtor` owes `creditor` (zero when there is no entry)
    pub fn amount_owed(&self, debtor: ParticipantId, creditor: ParticipantId) -> Money {
        self.debts
            .get(&(debtor, creditor))
            .copied()
            .unwrap_or(Money::ZERO)
    }

    /// All debts, ordered by debtor then creditor
    pub fn entries(&self) -> impl Iterator<Item = LedgerEntry> + '_ {
        self.debts
            .iter()
            .map(|(&(debtor, creditor), &amount)| LedgerEntry {
                debtor,
                creditor,
                amount,
            })
    }

    /// Sum of every outstanding debt, without netting
    pub fn total_outstanding(&self) -> Money {
        self.debts.values().sum()
    }

    pub fn len(&self) -> usize {
        self.debts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.debts.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.debts.clear();
    }

    fn add_debt(&mut self, debtor: ParticipantId, creditor: ParticipantId, amount: Money) {
        if debtor == creditor || !amount.is_positive() {
            return;
        }
        let owed = self.debts.entry((debtor, creditor)).or_insert(Money::ZERO);
        *owed = owed.saturating_add(amount);
    }
}

impl TryFrom<Vec<LedgerEntry>> for Ledger {
    type Error = PotluckError;

    fn try_from(entries: Vec<LedgerEntry>) -> Result<Self, Self::Error> {
        if Money::checked_sum(entries.iter().map(|e| e.amount)).is_none() {
            return Err(PotluckError::Validation(
                "ledger entries add up to more than can be represented".into(),
            ));
        }

        let mut ledger = Ledger::new();
        for entry in entries {
            if entry.debtor == entry.creditor {
                return Err(PotluckError::Validation(format!(
                    "ledger entry for {} owes themselves",
                    entry.debtor
                )));
            }
            if !entry.amount.is_positive() {
                return Err(PotluckError::Validation(format!(
                    "ledger entry {} -> {} has non-positive amount {}",
                    entry.debtor, entry.creditor, entry.amount
                )));
            }
            ledger.add_debt(entry.debtor, entry.creditor, entry.amount);
        }
        Ok(ledger)
    }
}

impl From<Ledger> for Vec<LedgerEntry> {
    fn from(ledger: Ledger) -> Self {
        ledger.entries().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, IdProvider, SequentialIdProvider, Share, SplitPolicy};
    use chrono::Utc;

    fn people(n: usize) -> Vec<ParticipantId> {
        let ids = SequentialIdProvider::new();
        (0..n).map(|_| ids.participant_id()).collect()
    }

    fn expense(paid_by: ParticipantId, shares: Vec<Share>) -> Expense {
        let amount = shares.iter().map(|s| s.amount).sum();
        Expense {
            id: ExpenseId::from_uuid(uuid::Uuid::from_u128(1000)),
            description: "test".into(),
            amount,
            paid_by,
            split_policy: SplitPolicy::Equal,
            shares,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_expense_skips_payer_share() {
        let p = people(3);
        let mut ledger = Ledger::new();
        ledger.apply_expense(&expense(
            p[0],
            p.iter().map(|&id| Share::new(id, Money::from_units(100))).collect(),
        )).unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.amount_owed(p[1], p[0]), Money::from_units(100));
        assert_eq!(ledger.amount_owed(p[2], p[0]), Money::from_units(100));
        assert_eq!(ledger.amount_owed(p[0], p[0]), Money::ZERO);
    }

    #[test]
    fn test_apply_expense_accumulates_and_keeps_both_directions() {
        let p = people(2);
        let mut ledger = Ledger::new();
        ledger.apply_expense(&expense(p[0], vec![Share::new(p[1], Money::from_units(10))])).unwrap();
        ledger.apply_expense(&expense(p[0], vec![Share::new(p[1], Money::from_units(5))])).unwrap();
        ledger.apply_expense(&expense(p[1], vec![Share::new(p[0], Money::from_units(7))])).unwrap();

        assert_eq!(ledger.amount_owed(p[1], p[0]), Money::from_units(15));
        assert_eq!(ledger.amount_owed(p[0], p[1]), Money::from_units(7));
        assert_eq!(ledger.net_position(p[0]).net(), Money::from_units(8));
    }

    #[test]
    fn test_settle_exact_amount_removes_entry() {
        let p = people(2);
        let mut ledger = Ledger::new();
        ledger.apply_expense(&expense(p[0], vec![Share::new(p[1], Money::from_units(50))])).unwrap();

        let outcome = ledger.settle(p[1], p[0], Money::from_units(50)).unwrap();
        assert_eq!(outcome.applied, Money::from_units(50));
        assert_eq!(outcome.absorbed, Money::ZERO);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_settle_partial() {
        let p = people(2);
        let mut ledger = Ledger::new();
        ledger.apply_expense(&expense(p[0], vec![Share::new(p[1], Money::from_units(50))])).unwrap();

        let outcome = ledger.settle(p[1], p[0], Money::from_units(20)).unwrap();
        assert_eq!(outcome.applied, Money::from_units(20));
        assert_eq!(ledger.amount_owed(p[1], p[0]), Money::from_units(30));
    }

    #[test]
    fn test_settle_overpayment_is_absorbed() {
        let p = people(2);
        let mut ledger = Ledger::new();
        ledger.apply_expense(&expense(p[0], vec![Share::new(p[1], Money::from_units(50))])).unwrap();

        let outcome = ledger.settle(p[1], p[0], Money::from_units(70)).unwrap();
        assert_eq!(outcome.applied, Money::from_units(50));
        assert_eq!(outcome.absorbed, Money::from_units(20));
        assert!(ledger.is_empty());
        assert_eq!(ledger.amount_owed(p[0], p[1]), Money::ZERO);
    }

    #[test]
    fn test_settle_without_debt_fails() {
        let p = people(2);
        let mut ledger = Ledger::new();
        ledger.apply_expense(&expense(p[0], vec![Share::new(p[1], Money::from_units(50))])).unwrap();

        // Wrong direction
        let err = ledger.settle(p[0], p[1], Money::from_units(10)).unwrap_err();
        assert!(matches!(err, PotluckError::NoOutstandingBalance { .. }));
        assert_eq!(ledger.amount_owed(p[1], p[0]), Money::from_units(50));
    }

    #[test]
    fn test_record_payment_overflow_reverses() {
        let p = people(2);
        let mut ledger = Ledger::new();
        ledger.apply_expense(&expense(p[0], vec![Share::new(p[1], Money::from_units(50))])).unwrap();

        ledger.record_payment(p[1], p[0], Money::from_units(80));
        assert_eq!(ledger.amount_owed(p[1], p[0]), Money::ZERO);
        assert_eq!(ledger.amount_owed(p[0], p[1]), Money::from_units(30));

        // Paying off the reversed debt clears the ledger
        ledger.record_payment(p[0], p[1], Money::from_units(30));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_apply_expense_overflow_books_nothing() {
        let p = people(3);
        let mut ledger = Ledger::new();
        let nearly_max = Money::from_cents(i64::MAX - 50);
        ledger
            .apply_expense(&expense(p[0], vec![Share::new(p[1], nearly_max)]))
            .unwrap();
        let before = ledger.clone();

        // Neither share overflows its own entry, but the total would
        let err = ledger
            .apply_expense(&expense(
                p[0],
                vec![Share::new(p[1], Money::from_cents(10)), Share::new(p[2], Money::from_units(1))],
            ))
            .unwrap_err();
        assert!(matches!(err, PotluckError::InvalidAmount(_)));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_net_position() {
        let p = people(3);
        let mut ledger = Ledger::new();
        ledger.apply_expense(&expense(
            p[0],
            vec![
                Share::new(p[1], Money::from_units(10)),
                Share::new(p[2], Money::from_units(20)),
            ],
        )).unwrap();
        ledger.apply_expense(&expense(p[2], vec![Share::new(p[0], Money::from_units(5))])).unwrap();

        let a = ledger.net_position(p[0]);
        assert_eq!(a.owes, Money::from_units(5));
        assert_eq!(a.owed_to, Money::from_units(30));
        assert_eq!(a.net(), Money::from_units(25));

        let total: Money = p.iter().map(|&id| ledger.net_position(id).net()).sum();
        assert_eq!(total, Money::ZERO);
        assert_eq!(ledger.total_outstanding(), Money::from_units(35));
    }

    #[test]
    fn test_serialization_round_trip_and_validation() {
        let p = people(2);
        let mut ledger = Ledger::new();
        ledger.apply_expense(&expense(p[0], vec![Share::new(p[1], Money::from_cents(1234))])).unwrap();

        let json = serde_json::to_string(&ledger).unwrap();
        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(ledger, back);

        let bad = format!(
            r#"[{{"debtor":"{0}","creditor":"{0}","amount":5}}]"#,
            p[0].as_uuid()
        );
        assert!(serde_json::from_str::<Ledger>(&bad).is_err());
    }
}
