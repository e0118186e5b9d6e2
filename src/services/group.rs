//! Group service
//!
//! Provides the business operations on groups: creating them, recording
//! expenses and settlements, and computing balances and settlement plans.
//! Every change to a stored group runs inside [`GroupRepository::update`],
//! so a failed expense or settlement never reaches disk.
//!
//! [`GroupRepository::update`]: crate::storage::GroupRepository::update

use serde_json::json;

use crate::audit::EntityType;
use crate::error::{PotluckError, PotluckResult};
use crate::models::{
    Balance, Expense, Group, IdProvider, Money, NewExpense, ParticipantId, Percentage,
    SettleOutcome, SettlementTransfer, SplitKind, SplitPolicy, UuidIdProvider,
};
use crate::storage::Storage;

use super::participant::ParticipantService;

/// A raw `participant=value` pair from the command line
pub type ShareArg = (String, String);

/// Parse a `name=value` share argument
pub fn parse_share_arg(s: &str) -> PotluckResult<ShareArg> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(PotluckError::Validation(format!(
            "Share must look like name=value, got '{}'",
            s
        ))),
    }
}

/// Service for group management
pub struct GroupService<'a> {
    storage: &'a Storage,
    ids: &'a dyn IdProvider,
}

impl<'a> GroupService<'a> {
    /// Create a new group service issuing random IDs
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_ids(storage, &UuidIdProvider)
    }

    /// Create a group service with a specific ID source
    pub fn with_ids(storage: &'a Storage, ids: &'a dyn IdProvider) -> Self {
        Self { storage, ids }
    }

    fn participants(&self) -> ParticipantService<'a> {
        ParticipantService::with_ids(self.storage, self.ids)
    }

    /// Create a group from registered participants
    pub fn create_group(&self, name: &str, members: &[String]) -> PotluckResult<Group> {
        if self.storage.groups.get_by_name(name)?.is_some() {
            return Err(PotluckError::Duplicate {
                entity_type: "Group",
                identifier: name.trim().to_string(),
            });
        }

        let participants = self.participants();
        let member_ids = members
            .iter()
            .map(|m| participants.require(m).map(|p| p.id))
            .collect::<PotluckResult<Vec<_>>>()?;

        let group = Group::new(self.ids, name, member_ids)?;

        self.storage.groups.insert(group.clone())?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            &group,
        )?;

        Ok(group)
    }

    /// Find a group by name or ID
    pub fn find(&self, identifier: &str) -> PotluckResult<Option<Group>> {
        if let Some(group) = self.storage.groups.get_by_name(identifier)? {
            return Ok(Some(group));
        }

        if let Ok(id) = identifier.trim().parse() {
            return self.storage.groups.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn require(&self, identifier: &str) -> PotluckResult<Group> {
        self.find(identifier)?
            .ok_or_else(|| PotluckError::group_not_found(identifier))
    }

    /// List all groups, sorted by name
    pub fn list(&self) -> PotluckResult<Vec<Group>> {
        self.storage.groups.get_all()
    }

    /// Turn a split kind and its `name=value` arguments into a policy
    pub fn build_policy(&self, kind: SplitKind, shares: &[ShareArg]) -> PotluckResult<SplitPolicy> {
        match kind {
            SplitKind::Equal => {
                if !shares.is_empty() {
                    return Err(PotluckError::Validation(
                        "An EQUAL split does not take share values".into(),
                    ));
                }
                Ok(SplitPolicy::Equal)
            }
            SplitKind::Exact => {
                let entries = shares
                    .iter()
                    .map(|(who, value)| {
                        let amount = Money::parse(value)
                            .map_err(|e| PotluckError::InvalidAmount(e.to_string()))?;
                        Ok((self.resolve_participant(who)?, amount))
                    })
                    .collect::<PotluckResult<Vec<_>>>()?;
                Ok(SplitPolicy::Exact(entries))
            }
            SplitKind::Percent => {
                let entries = shares
                    .iter()
                    .map(|(who, value)| {
                        let pct = Percentage::parse(value)
                            .map_err(|e| PotluckError::Validation(e.to_string()))?;
                        Ok((self.resolve_participant(who)?, pct))
                    })
                    .collect::<PotluckResult<Vec<_>>>()?;
                Ok(SplitPolicy::Percent(entries))
            }
        }
    }

    /// Record an expense in a group
    pub fn add_expense(
        &self,
        group: &str,
        description: &str,
        amount: Money,
        paid_by: &str,
        policy: SplitPolicy,
    ) -> PotluckResult<Expense> {
        let group = self.require(group)?;
        let paid_by = self.resolve_participant(paid_by)?;
        let new = NewExpense::new(description, amount, paid_by, policy);

        let (expense, _) = self
            .storage
            .groups
            .update(group.id, |g| g.add_expense(self.ids, new).cloned())?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id.to_string(),
            Some(expense.description.clone()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Pay down what `payer` owes `payee` in a group
    pub fn settle(
        &self,
        group: &str,
        payer: &str,
        payee: &str,
        amount: Money,
    ) -> PotluckResult<SettleOutcome> {
        let group = self.require(group)?;
        let payer = self.resolve_participant(payer)?;
        let payee = self.resolve_participant(payee)?;

        let (outcome, _) = self
            .storage
            .groups
            .update(group.id, |g| g.settle(payer, payee, amount))?;
        self.storage.groups.save()?;

        self.storage.log_create(
            EntityType::Settlement,
            group.id.to_string(),
            Some(group.name.clone()),
            &json!({
                "payer": payer,
                "payee": payee,
                "amount": amount,
                "applied": outcome.applied,
                "absorbed": outcome.absorbed,
            }),
        )?;

        Ok(outcome)
    }

    /// Balances for every member, or for one participant when given
    pub fn balance(
        &self,
        group: &str,
        participant: Option<&str>,
    ) -> PotluckResult<Vec<(ParticipantId, Balance)>> {
        let group = self.require(group)?;
        match participant {
            Some(who) => {
                let id = self.resolve_participant(who)?;
                if !group.is_member(id) {
                    return Err(PotluckError::UnknownParticipant(who.to_string()));
                }
                Ok(vec![(id, group.user_balance(id))])
            }
            None => Ok(group.net_positions()),
        }
    }

    /// Settlement plan for a group, without booking it
    pub fn simplify(&self, group: &str) -> PotluckResult<Vec<SettlementTransfer>> {
        Ok(self.require(group)?.simplify_balances())
    }

    /// Compute the settlement plan and book it as paid
    pub fn settle_up(&self, group: &str) -> PotluckResult<Vec<SettlementTransfer>> {
        let group = self.require(group)?;

        let (plan, before) = self
            .storage
            .groups
            .update(group.id, |g| Ok(g.settle_up()))?;
        if plan.is_empty() {
            return Ok(plan);
        }
        self.storage.groups.save()?;

        let after = self
            .storage
            .groups
            .get(group.id)?
            .ok_or_else(|| PotluckError::group_not_found(group.id.to_string()))?;
        self.storage.log_update(
            EntityType::Group,
            group.id.to_string(),
            Some(group.name.clone()),
            before.ledger(),
            after.ledger(),
            Some(format!(
                "settled up with {} transfer(s) totalling {}",
                plan.len(),
                plan.iter().map(|t| t.amount).sum::<Money>()
            )),
        )?;

        Ok(plan)
    }

    /// Registry lookup for participants named in expense and settlement input
    fn resolve_participant(&self, identifier: &str) -> PotluckResult<ParticipantId> {
        self.participants()
            .find(identifier)?
            .map(|p| p.id)
            .ok_or_else(|| PotluckError::UnknownParticipant(identifier.to_string()))
    }
}
