//! Participant repository for JSON storage
//!
//! Manages loading and saving the participant registry to participants.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PotluckError;
use crate::models::{Participant, ParticipantId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable participant data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ParticipantData {
    participants: Vec<Participant>,
}

/// Repository for participant persistence
pub struct ParticipantRepository {
    path: PathBuf,
    data: RwLock<HashMap<ParticipantId, Participant>>,
    /// Index: normalized name -> participant_id
    by_name: RwLock<HashMap<String, ParticipantId>>,
}

impl ParticipantRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Load participants from disk
    pub fn load(&self) -> Result<(), PotluckError> {
        let file_data: ParticipantData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        by_name.clear();
        for participant in file_data.participants {
            by_name.insert(Participant::normalize_name(&participant.name), participant.id);
            data.insert(participant.id, participant);
        }

        Ok(())
    }

    /// Save participants to disk, ordered by registration time
    pub fn save(&self) -> Result<(), PotluckError> {
        let participants = self.get_all_by(|a, b| a.created_at.cmp(&b.created_at))?;
        write_json_atomic(&self.path, &ParticipantData { participants })
    }

    pub fn get(&self, id: ParticipantId) -> Result<Option<Participant>, PotluckError> {
        let data = self.data.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(&id).cloned())
    }

    /// All participants sorted by name
    pub fn get_all(&self) -> Result<Vec<Participant>, PotluckError> {
        self.get_all_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    }

    /// Look up a participant by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Participant>, PotluckError> {
        let data = self.data.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let by_name = self.by_name.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(by_name
            .get(&Participant::normalize_name(name))
            .and_then(|id| data.get(id))
            .cloned())
    }

    /// Insert or replace a participant
    pub fn upsert(&self, participant: Participant) -> Result<(), PotluckError> {
        let mut data = self.data.write().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        let mut by_name = self.by_name.write().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if let Some(old) = data.get(&participant.id) {
            by_name.remove(&Participant::normalize_name(&old.name));
        }
        by_name.insert(Participant::normalize_name(&participant.name), participant.id);
        data.insert(participant.id, participant);
        Ok(())
    }

    pub fn count(&self) -> Result<usize, PotluckError> {
        let data = self.data.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }

    fn get_all_by<F>(&self, compare: F) -> Result<Vec<Participant>, PotluckError>
    where
        F: FnMut(&Participant, &Participant) -> std::cmp::Ordering,
    {
        let data = self.data.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let mut participants: Vec<_> = data.values().cloned().collect();
        participants.sort_by(compare);
        Ok(participants)
    }
}
