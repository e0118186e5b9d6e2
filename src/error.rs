//! Custom error types for Potluck
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

use crate::models::Money;

/// The main error type for Potluck operations
#[derive(Error, Debug)]
pub enum PotluckError {
    /// The split policy name is not one of equal, exact or percent
    #[error("Invalid split policy: {0}")]
    InvalidSplitPolicy(String),

    /// Exact amounts or percentages do not add up to the required total
    #[error("Split mismatch: expected {expected}, got {actual}")]
    SplitMismatch { expected: String, actual: String },

    /// A referenced participant is not a member of the group
    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    /// Non-positive or otherwise unusable amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// The group cannot perform the requested operation in its current shape
    #[error("Invalid group state: {0}")]
    InvalidGroupState(String),

    /// Settlement against a pair that has no outstanding debt
    #[error("No outstanding balance from {payer} to {payee}")]
    NoOutstandingBalance { payer: String, payee: String },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl PotluckError {
    /// Create a "not found" error for participants
    pub fn participant_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Participant",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for groups
    pub fn group_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Group",
            identifier: identifier.into(),
        }
    }

    /// Create a split mismatch error between two money totals
    pub fn money_mismatch(expected: Money, actual: Money) -> Self {
        Self::SplitMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error comes from expense splitting or ledger accounting
    /// rather than from the storage or configuration layers
    pub fn is_accounting(&self) -> bool {
        matches!(
            self,
            Self::InvalidSplitPolicy(_)
                | Self::SplitMismatch { .. }
                | Self::UnknownParticipant(_)
                | Self::InvalidAmount(_)
                | Self::InvalidGroupState(_)
                | Self::NoOutstandingBalance { .. }
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for PotluckError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for PotluckError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Potluck operations
pub type PotluckResult<T> = Result<T, PotluckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PotluckError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = PotluckError::group_not_found("Trip");
        assert_eq!(err.to_string(), "Group not found: Trip");
        assert!(err.is_not_found());
        assert!(!err.is_accounting());
    }

    #[test]
    fn test_split_mismatch_error() {
        let err = PotluckError::money_mismatch(Money::from_cents(30000), Money::from_cents(29999));
        assert_eq!(
            err.to_string(),
            "Split mismatch: expected $300.00, got $299.99"
        );
        assert!(err.is_accounting());
    }

    #[test]
    fn test_no_outstanding_balance_error() {
        let err = PotluckError::NoOutstandingBalance {
            payer: "Alice".into(),
            payee: "Bob".into(),
        };
        assert_eq!(err.to_string(), "No outstanding balance from Alice to Bob");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PotluckError = io_err.into();
        assert!(matches!(err, PotluckError::Io(_)));
    }
}
