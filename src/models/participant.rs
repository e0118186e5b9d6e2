//! Participant model
//!
//! A person who can pay for, or owe part of, a shared expense. Participants
//! live in a registry of their own and can be members of several groups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{IdProvider, ParticipantId};

/// A participant in one or more expense groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Unique identifier
    pub id: ParticipantId,

    /// Display name
    pub name: String,

    /// When the participant was registered
    pub created_at: DateTime<Utc>,
}

impl Participant {
    /// Create a new participant with an ID from the given provider
    pub fn new(ids: &dyn IdProvider, name: impl Into<String>) -> Self {
        Self {
            id: ids.participant_id(),
            name: name.into().trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Normalize a name for case-insensitive lookups
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Validate the participant
    pub fn validate(&self) -> Result<(), ParticipantValidationError> {
        if self.name.is_empty() {
            return Err(ParticipantValidationError::EmptyName);
        }
        if self.name.len() > 64 {
            return Err(ParticipantValidationError::NameTooLong(self.name.len()));
        }
        Ok(())
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for participants
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParticipantValidationError {
    #[error("Participant name cannot be empty")]
    EmptyName,
    #[error("Participant name too long ({0} chars, max 64)")]
    NameTooLong(usize),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SequentialIdProvider;

    #[test]
    fn test_new_participant_trims_name() {
        let ids = SequentialIdProvider::new();
        let p = Participant::new(&ids, "  Alice ");
        assert_eq!(p.name, "Alice");
        assert_eq!(p.to_string(), "Alice");
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let ids = SequentialIdProvider::new();
        assert_eq!(
            Participant::new(&ids, "   ").validate(),
            Err(ParticipantValidationError::EmptyName)
        );
        assert!(matches!(
            Participant::new(&ids, "x".repeat(65)).validate(),
            Err(ParticipantValidationError::NameTooLong(65))
        ));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(Participant::normalize_name(" BoB "), "bob");
    }
}
