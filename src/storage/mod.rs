//! Storage layer for Potluck
//!
//! Provides JSON file storage with atomic writes, automatic directory
//! creation, and audit logging of every mutation.

pub mod file_io;
pub mod groups;
pub mod participants;

pub use file_io::{read_json, write_json_atomic};
pub use groups::GroupRepository;
pub use participants::ParticipantRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::PotluckPaths;
use crate::error::PotluckError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PotluckPaths,
    pub participants: ParticipantRepository,
    pub groups: GroupRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance with audit logging enabled
    pub fn new(paths: PotluckPaths) -> Result<Self, PotluckError> {
        paths.ensure_directories()?;

        Ok(Self {
            participants: ParticipantRepository::new(paths.participants_file()),
            groups: GroupRepository::new(paths.groups_file()),
            audit: Some(AuditLogger::new(paths.audit_log())),
            paths,
        })
    }

    /// Turn audit logging off (or back on)
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit = enabled.then(|| AuditLogger::new(self.paths.audit_log()));
        self
    }

    pub fn paths(&self) -> &PotluckPaths {
        &self.paths
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), PotluckError> {
        self.participants.load()?;
        self.groups.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PotluckError> {
        self.participants.save()?;
        self.groups.save()?;
        Ok(())
    }

    /// Record a newly created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PotluckError> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::create(
                entity_type,
                entity_id,
                entity_name,
                entity,
            )),
            None => Ok(()),
        }
    }

    /// Record an in-place change in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        summary: Option<String>,
    ) -> Result<(), PotluckError> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::update(
                entity_type,
                entity_id,
                entity_name,
                before,
                after,
                summary,
            )),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Participant, SequentialIdProvider};
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PotluckPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(storage.audit().is_some());
    }

    #[test]
    fn test_log_create_writes_entry() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PotluckPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let p = Participant::new(&SequentialIdProvider::new(), "Alice");
        storage
            .log_create(EntityType::Participant, p.id.to_string(), Some(p.name.clone()), &p)
            .unwrap();

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].entity_name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_audit_disabled_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PotluckPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap().with_audit(false);

        let p = Participant::new(&SequentialIdProvider::new(), "Bob");
        storage
            .log_create(EntityType::Participant, p.id.to_string(), None, &p)
            .unwrap();
        assert!(!temp_dir.path().join("audit.log").exists());
    }

    #[test]
    fn test_save_and_load_all() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PotluckPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths.clone()).unwrap();
        storage
            .participants
            .upsert(Participant::new(&SequentialIdProvider::new(), "Carol"))
            .unwrap();
        storage.save_all().unwrap();

        let mut reopened = Storage::new(paths).unwrap();
        reopened.load_all().unwrap();
        assert_eq!(reopened.participants.count().unwrap(), 1);
        assert_eq!(reopened.groups.count().unwrap(), 0);
    }
}
