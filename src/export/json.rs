//! JSON export
//!
//! Exports one group (members, expenses, debts, balances and the current
//! settlement plan) with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PotluckError, PotluckResult};
use crate::models::{Group, Money, Participant, ParticipantId, SettlementTransfer};
use crate::services::GroupService;
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// One member's position at export time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberBalance {
    pub participant_id: ParticipantId,
    pub name: String,
    pub owes: Money,
    pub owed_to: Money,
    pub net: Money,
}

/// Complete snapshot of a group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// The group itself, including its expenses and ledger
    pub group: Group,

    /// Registry entries for every member
    pub participants: Vec<Participant>,

    /// Per-member balances, in member order
    pub balances: Vec<MemberBalance>,

    /// Payments that would settle the group
    pub settlement_plan: Vec<SettlementTransfer>,
}

impl GroupExport {
    /// Build an export for the group named (or identified) by `group`
    pub fn from_storage(storage: &Storage, group: &str) -> PotluckResult<Self> {
        let group = GroupService::new(storage).require(group)?;

        let participants = group
            .members()
            .iter()
            .map(|&id| {
                storage
                    .participants
                    .get(id)?
                    .ok_or_else(|| PotluckError::participant_not_found(id.to_string()))
            })
            .collect::<PotluckResult<Vec<_>>>()?;

        let balances = participants
            .iter()
            .map(|p| {
                let balance = group.user_balance(p.id);
                MemberBalance {
                    participant_id: p.id,
                    name: p.name.clone(),
                    owes: balance.owes,
                    owed_to: balance.owed_to,
                    net: balance.net(),
                }
            })
            .collect();

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            settlement_plan: group.simplify_balances(),
            participants,
            balances,
            group,
        })
    }

    /// Check the export is internally consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        for member in self.group.members() {
            if !self.participants.iter().any(|p| p.id == *member) {
                return Err(format!("Member {} has no participant record", member));
            }
        }

        let net: Money = self.balances.iter().map(|b| b.net).sum();
        if !net.is_zero() {
            return Err(format!("Balances do not net to zero (off by {})", net));
        }

        Ok(())
    }

    /// Name of a member, or the short ID if it is missing
    pub fn name_of(&self, id: ParticipantId) -> String {
        self.participants
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// Export a group to JSON
pub fn export_group_json<W: Write>(
    storage: &Storage,
    group: &str,
    writer: &mut W,
    pretty: bool,
) -> PotluckResult<()> {
    let export = GroupExport::from_storage(storage, group)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| PotluckError::Export(e.to_string()))?;

    Ok(())
}
