//! Group aggregate
//!
//! A group owns its member list, its expense history and its ledger, and is
//! the only way expenses and settlements reach the ledger. Every mutating
//! operation validates first and mutates last, so a failed call leaves the
//! group exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::expense::Expense;
use super::ids::{GroupId, IdProvider, ParticipantId};
use super::ledger::{Balance, Ledger, SettleOutcome};
use super::money::Money;
use super::settlement::{SettlementPlanner, SettlementTransfer};
use super::split::SplitPolicy;
use crate::error::{PotluckError, PotluckResult};

/// Input for [`Group::add_expense`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub description: String,
    pub amount: Money,
    pub paid_by: ParticipantId,
    pub policy: SplitPolicy,
}

impl NewExpense {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        paid_by: ParticipantId,
        policy: SplitPolicy,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            paid_by,
            policy,
        }
    }
}

/// A group of participants sharing expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// When the group was created
    pub created_at: DateTime<Utc>,

    /// Members, fixed at creation; their order drives split residuals and
    /// settlement pairing
    members: Vec<ParticipantId>,

    /// Expenses in the order they were added
    #[serde(default)]
    expenses: Vec<Expense>,

    #[serde(default)]
    ledger: Ledger,
}

impl Group {
    /// Create a group with a fixed member list
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name, `InvalidGroupState` for an empty or
    /// duplicated member list.
    pub fn new(
        ids: &dyn IdProvider,
        name: impl Into<String>,
        members: Vec<ParticipantId>,
    ) -> PotluckResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(PotluckError::Validation("Group name cannot be empty".into()));
        }
        if members.is_empty() {
            return Err(PotluckError::InvalidGroupState(
                "a group needs at least one member".into(),
            ));
        }
        for (i, member) in members.iter().enumerate() {
            if members[..i].contains(member) {
                return Err(PotluckError::InvalidGroupState(format!(
                    "{} is listed more than once",
                    member
                )));
            }
        }

        Ok(Self {
            id: ids.group_id(),
            name,
            created_at: Utc::now(),
            members,
            expenses: Vec::new(),
            ledger: Ledger::new(),
        })
    }

    pub fn members(&self) -> &[ParticipantId] {
        &self.members
    }

    pub fn is_member(&self, participant: ParticipantId) -> bool {
        self.members.contains(&participant)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Record an expense and book its shares as debts to the payer
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for a non-positive amount or one the ledger cannot
    /// hold, `UnknownParticipant` when the payer or anyone in the split input
    /// is not a member, plus any error from [`SplitPolicy::compute_shares`].
    /// On error neither the history nor the ledger changes.
    pub fn add_expense(
        &mut self,
        ids: &dyn IdProvider,
        new: NewExpense,
    ) -> PotluckResult<&Expense> {
        if !new.amount.is_positive() {
            return Err(PotluckError::InvalidAmount(format!(
                "expense amount must be positive, got {}",
                new.amount
            )));
        }
        self.ensure_member(new.paid_by)?;

        let shares = new.policy.compute_shares(new.amount, &self.members)?;
        let expense = Expense {
            id: ids.expense_id(),
            description: new.description.trim().to_string(),
            amount: new.amount,
            paid_by: new.paid_by,
            split_policy: new.policy,
            shares,
            created_at: Utc::now(),
        };
        expense
            .validate()
            .map_err(|e| PotluckError::InvalidAmount(e.to_string()))?;

        self.ledger.apply_expense(&expense)?;
        self.expenses.push(expense);
        Ok(&self.expenses[self.expenses.len() - 1])
    }

    /// Pay down what `payer` owes `payee`
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for a non-positive amount, `NoOutstandingBalance` when
    /// `payer` owes `payee` nothing.
    pub fn settle(
        &mut self,
        payer: ParticipantId,
        payee: ParticipantId,
        amount: Money,
    ) -> PotluckResult<SettleOutcome> {
        if !amount.is_positive() {
            return Err(PotluckError::InvalidAmount(format!(
                "settlement amount must be positive, got {}",
                amount
            )));
        }
        self.ledger.settle(payer, payee, amount)
    }

    /// What a participant owes and is owed in this group
    pub fn user_balance(&self, participant: ParticipantId) -> Balance {
        self.ledger.net_position(participant)
    }

    /// Balances for every member, in member order
    pub fn net_positions(&self) -> Vec<(ParticipantId, Balance)> {
        self.members
            .iter()
            .map(|&id| (id, self.ledger.net_position(id)))
            .collect()
    }

    /// Payments that would clear every member's net position
    pub fn simplify_balances(&self) -> Vec<SettlementTransfer> {
        SettlementPlanner::plan(&self.members, &self.ledger)
    }

    /// Compute the settlement plan and book it as paid
    ///
    /// After booking every transfer all net positions are zero, so whatever
    /// entries remain cancel out among themselves and the ledger is emptied.
    pub fn settle_up(&mut self) -> Vec<SettlementTransfer> {
        let plan = self.simplify_balances();
        for transfer in &plan {
            self.ledger
                .record_payment(transfer.from, transfer.to, transfer.amount);
        }
        debug_assert!(self
            .members
            .iter()
            .all(|&id| self.ledger.net_position(id).net().is_zero()));
        self.ledger.clear();
        plan
    }

    /// Sum of all expense amounts
    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    fn ensure_member(&self, participant: ParticipantId) -> PotluckResult<()> {
        if self.is_member(participant) {
            Ok(())
        } else {
            Err(PotluckError::UnknownParticipant(participant.to_string()))
        }
    }
}
