//! Participant service
//!
//! Registers participants and resolves them by name or ID.

use std::collections::HashMap;

use crate::audit::EntityType;
use crate::error::{PotluckError, PotluckResult};
use crate::models::{IdProvider, Participant, ParticipantId, UuidIdProvider};
use crate::storage::Storage;

/// Service for participant management
pub struct ParticipantService<'a> {
    storage: &'a Storage,
    ids: &'a dyn IdProvider,
}

impl<'a> ParticipantService<'a> {
    /// Create a new participant service issuing random IDs
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_ids(storage, &UuidIdProvider)
    }

    /// Create a participant service with a specific ID source
    pub fn with_ids(storage: &'a Storage, ids: &'a dyn IdProvider) -> Self {
        Self { storage, ids }
    }

    /// Register a new participant
    pub fn create(&self, name: &str) -> PotluckResult<Participant> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PotluckError::Validation(
                "Participant name cannot be empty".into(),
            ));
        }

        // Check for duplicate
        if self.storage.participants.get_by_name(name)?.is_some() {
            return Err(PotluckError::Duplicate {
                entity_type: "Participant",
                identifier: name.to_string(),
            });
        }

        let participant = Participant::new(self.ids, name);
        participant
            .validate()
            .map_err(|e| PotluckError::Validation(e.to_string()))?;

        self.storage.participants.upsert(participant.clone())?;
        self.storage.participants.save()?;

        self.storage.log_create(
            EntityType::Participant,
            participant.id.to_string(),
            Some(participant.name.clone()),
            &participant,
        )?;

        Ok(participant)
    }

    pub fn get(&self, id: ParticipantId) -> PotluckResult<Option<Participant>> {
        self.storage.participants.get(id)
    }

    /// Find a participant by name or ID
    pub fn find(&self, identifier: &str) -> PotluckResult<Option<Participant>> {
        if let Some(participant) = self.storage.participants.get_by_name(identifier)? {
            return Ok(Some(participant));
        }

        if let Ok(id) = identifier.trim().parse::<ParticipantId>() {
            return self.storage.participants.get(id);
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn require(&self, identifier: &str) -> PotluckResult<Participant> {
        self.find(identifier)?
            .ok_or_else(|| PotluckError::participant_not_found(identifier))
    }

    /// List all participants, sorted by name
    pub fn list(&self) -> PotluckResult<Vec<Participant>> {
        self.storage.participants.get_all()
    }

    /// Display names keyed by ID
    pub fn names(&self) -> PotluckResult<HashMap<ParticipantId, String>> {
        Ok(self
            .list()?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect())
    }
}
