//! Expense model
//!
//! A single payment made by one participant on behalf of the group, along
//! with the shares it was divided into.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ExpenseId, ParticipantId};
use super::money::Money;
use super::split::{Share, SplitPolicy};

/// A recorded group expense
///
/// Expenses are immutable once created and are never removed from a group's
/// history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Total amount paid (always positive)
    pub amount: Money,

    /// Who paid
    pub paid_by: ParticipantId,

    /// The policy (and its input) used to compute `shares`
    pub split_policy: SplitPolicy,

    /// Per-participant shares in member order; they sum to `amount`
    pub shares: Vec<Share>,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// The share owed by a participant, or zero when they are not part of it
    pub fn share_of(&self, participant_id: ParticipantId) -> Money {
        self.shares
            .iter()
            .filter(|s| s.participant_id == participant_id)
            .map(|s| s.amount)
            .sum()
    }

    /// Total of all shares (equals `amount` for a valid expense)
    pub fn shares_total(&self) -> Money {
        self.shares.iter().map(|s| s.amount).sum()
    }

    /// Shares owed to the payer by everyone else
    pub fn obligations(&self) -> impl Iterator<Item = &Share> + '_ {
        self.shares
            .iter()
            .filter(move |s| s.participant_id != self.paid_by && s.amount.is_positive())
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        let shares_total = self.shares_total();
        if shares_total != self.amount {
            return Err(ExpenseValidationError::SharesMismatch {
                amount: self.amount,
                shares_total,
            });
        }
        Ok(())
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Money),
    #[error("Shares total {shares_total} does not match expense amount {amount}")]
    SharesMismatch { amount: Money, shares_total: Money },
}
