//! Split policies
//!
//! Turns an expense total into per-participant shares. Every policy returns
//! shares in group member order and the shares always add up to the total
//! to the cent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::ParticipantId;
use super::money::Money;
use super::percentage::{format_basis_points, total_basis_points, Percentage};
use crate::error::{PotluckError, PotluckResult};

/// The portion of an expense owed by one participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub participant_id: ParticipantId,
    pub amount: Money,
}

impl Share {
    pub fn new(participant_id: ParticipantId, amount: Money) -> Self {
        Self {
            participant_id,
            amount,
        }
    }
}

/// Name of a split policy, without its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitKind {
    #[default]
    Equal,
    Exact,
    Percent,
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "EQUAL"),
            Self::Exact => write!(f, "EXACT"),
            Self::Percent => write!(f, "PERCENT"),
        }
    }
}

impl FromStr for SplitKind {
    type Err = PotluckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" => Ok(Self::Equal),
            "exact" => Ok(Self::Exact),
            "percent" | "percentage" => Ok(Self::Percent),
            _ => Err(PotluckError::InvalidSplitPolicy(s.trim().to_string())),
        }
    }
}

/// How an expense is divided, together with the policy's input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "input", rename_all = "lowercase")]
pub enum SplitPolicy {
    /// Everyone in the group pays the same share
    Equal,
    /// Fixed amounts per participant; must add up to the total
    Exact(Vec<(ParticipantId, Money)>),
    /// Percentages per participant; must add up to 100%
    Percent(Vec<(ParticipantId, Percentage)>),
}

impl SplitPolicy {
    pub fn kind(&self) -> SplitKind {
        match self {
            Self::Equal => SplitKind::Equal,
            Self::Exact(_) => SplitKind::Exact,
            Self::Percent(_) => SplitKind::Percent,
        }
    }

    /// Compute each member's share of `amount`
    ///
    /// Leftover cents are handed out one at a time in member order: to the
    /// first members of the group for `Equal`, and to the first listed
    /// participants with a non-zero percentage for `Percent`.
    ///
    /// # Errors
    ///
    /// - `InvalidGroupState` when an `Equal` split has no members
    /// - `UnknownParticipant` when the input names someone outside `members`
    /// - `InvalidAmount` for a negative `Exact` value
    /// - `SplitMismatch` when exact amounts or percentages miss their total
    pub fn compute_shares(
        &self,
        amount: Money,
        members: &[ParticipantId],
    ) -> PotluckResult<Vec<Share>> {
        match self {
            Self::Equal => equal_shares(amount, members),
            Self::Exact(entries) => exact_shares(amount, members, entries),
            Self::Percent(entries) => percent_shares(amount, members, entries),
        }
    }
}

fn equal_shares(amount: Money, members: &[ParticipantId]) -> PotluckResult<Vec<Share>> {
    if members.is_empty() {
        return Err(PotluckError::InvalidGroupState(
            "cannot split equally among zero members".into(),
        ));
    }

    Ok(members
        .iter()
        .zip(amount.split_evenly(members.len()))
        .map(|(&id, part)| Share::new(id, part))
        .collect())
}

fn exact_shares(
    amount: Money,
    members: &[ParticipantId],
    entries: &[(ParticipantId, Money)],
) -> PotluckResult<Vec<Share>> {
    for (id, value) in entries {
        ensure_member(members, *id)?;
        if value.is_negative() {
            return Err(PotluckError::InvalidAmount(format!(
                "exact share for {} is negative ({})",
                id, value
            )));
        }
    }

    let actual = Money::checked_sum(entries.iter().map(|(_, value)| *value)).ok_or_else(|| {
        PotluckError::SplitMismatch {
            expected: amount.to_string(),
            actual: format!("more than {}", Money::MAX),
        }
    })?;
    if actual != amount {
        return Err(PotluckError::money_mismatch(amount, actual));
    }

    Ok(in_member_order(members, entries)
        .into_iter()
        .map(|(id, value)| Share::new(id, value))
        .collect())
}

fn percent_shares(
    amount: Money,
    members: &[ParticipantId],
    entries: &[(ParticipantId, Percentage)],
) -> PotluckResult<Vec<Share>> {
    for (id, _) in entries {
        ensure_member(members, *id)?;
    }

    let total = total_basis_points(entries.iter().map(|(_, pct)| *pct));
    if total != u64::from(Percentage::WHOLE.basis_points()) {
        return Err(PotluckError::SplitMismatch {
            expected: Percentage::WHOLE.to_string(),
            actual: format_basis_points(total),
        });
    }

    let listed = in_member_order(members, entries);
    let mut shares: Vec<Share> = listed
        .iter()
        .map(|(id, pct)| Share::new(*id, amount.percent_floor(*pct)))
        .collect();

    // Flooring loses less than a cent per non-zero entry, so one pass is enough.
    let mut leftover = (amount - shares.iter().map(|s| s.amount).sum::<Money>()).cents();
    for (share, (_, pct)) in shares.iter_mut().zip(&listed) {
        if leftover == 0 {
            break;
        }
        if !pct.is_zero() {
            share.amount += Money::from_cents(1);
            leftover -= 1;
        }
    }
    debug_assert_eq!(leftover, 0);

    Ok(shares)
}

fn ensure_member(members: &[ParticipantId], id: ParticipantId) -> PotluckResult<()> {
    if members.contains(&id) {
        Ok(())
    } else {
        Err(PotluckError::UnknownParticipant(id.to_string()))
    }
}

/// Collapse repeated entries and reorder them to follow `members`
///
/// Callers check the overall total first, so the per-member sums fit.
fn in_member_order<T>(members: &[ParticipantId], entries: &[(ParticipantId, T)]) -> Vec<(ParticipantId, T)>
where
    T: Copy + std::iter::Sum<T>,
{
    members
        .iter()
        .filter(|m| entries.iter().any(|(id, _)| id == *m))
        .map(|m| {
            let total = entries
                .iter()
                .filter(|(id, _)| id == m)
                .map(|(_, value)| *value)
                .sum();
            (*m, total)
        })
        .collect()
}
