//! Group repository for JSON storage
//!
//! Manages loading and saving groups (with their expenses and ledgers) to
//! groups.json. All changes to a stored group go through
//! [`GroupRepository::update`], which holds the write lock for the whole
//! change so that an expense or settlement applies completely or not at all.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::{PotluckError, PotluckResult};
use crate::models::{Group, GroupId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable group data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GroupData {
    groups: Vec<Group>,
}

/// Repository for group persistence
pub struct GroupRepository {
    path: PathBuf,
    data: RwLock<HashMap<GroupId, Group>>,
}

impl GroupRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load groups from disk
    pub fn load(&self) -> PotluckResult<()> {
        let file_data: GroupData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for group in file_data.groups {
            data.insert(group.id, group);
        }

        Ok(())
    }

    /// Save groups to disk, ordered by creation time
    pub fn save(&self) -> PotluckResult<()> {
        let data = self.data.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut groups: Vec<_> = data.values().cloned().collect();
        groups.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        write_json_atomic(&self.path, &GroupData { groups })
    }

    pub fn get(&self, id: GroupId) -> PotluckResult<Option<Group>> {
        let data = self.data.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.get(&id).cloned())
    }

    /// Look up a group by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> PotluckResult<Option<Group>> {
        let data = self.data.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let wanted = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|g| g.name.to_lowercase() == wanted)
            .cloned())
    }

    /// All groups sorted by name
    pub fn get_all(&self) -> PotluckResult<Vec<Group>> {
        let data = self.data.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        let mut groups: Vec<_> = data.values().cloned().collect();
        groups.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(groups)
    }

    /// Add a new group
    pub fn insert(&self, group: Group) -> PotluckResult<()> {
        let mut data = self.data.write().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        if data.contains_key(&group.id) {
            return Err(PotluckError::Duplicate {
                entity_type: "Group",
                identifier: group.id.to_string(),
            });
        }
        data.insert(group.id, group);
        Ok(())
    }

    /// Apply a change to one group under the write lock
    ///
    /// The closure works on a copy; the stored group is replaced only if the
    /// closure succeeds. Returns the closure's result together with the group
    /// as it was before the change.
    pub fn update<F, R>(&self, id: GroupId, change: F) -> PotluckResult<(R, Group)>
    where
        F: FnOnce(&mut Group) -> PotluckResult<R>,
    {
        let mut data = self.data.write().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let stored = data
            .get_mut(&id)
            .ok_or_else(|| PotluckError::group_not_found(id.to_string()))?;

        let mut working = stored.clone();
        let result = change(&mut working)?;
        let before = std::mem::replace(stored, working);
        Ok((result, before))
    }

    pub fn count(&self) -> PotluckResult<usize> {
        let data = self.data.read().map_err(|e| {
            PotluckError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IdProvider, Money, NewExpense, SequentialIdProvider, SplitPolicy};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, GroupRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = GroupRepository::new(temp_dir.path().join("groups.json"));
        (temp_dir, repo)
    }

    #[test]
    fn test_insert_and_find() {
        let (_temp, repo) = create_test_repo();
        let ids = SequentialIdProvider::new();
        let group = Group::new(&ids, "Ski Trip", vec![ids.participant_id()]).unwrap();
        repo.insert(group.clone()).unwrap();

        assert_eq!(repo.get(group.id).unwrap(), Some(group.clone()));
        assert_eq!(repo.get_by_name("ski trip").unwrap(), Some(group.clone()));
        assert!(matches!(
            repo.insert(group),
            Err(PotluckError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_failed_update_keeps_stored_group() {
        let (_temp, repo) = create_test_repo();
        let ids = SequentialIdProvider::new();
        let (a, b) = (ids.participant_id(), ids.participant_id());
        let group = Group::new(&ids, "Flat", vec![a, b]).unwrap();
        let id = group.id;
        repo.insert(group).unwrap();

        let ((), before) = repo
            .update(id, |g| {
                g.add_expense(&ids, NewExpense::new("Rent", Money::from_units(800), a, SplitPolicy::Equal))?;
                Ok(())
            })
            .unwrap();
        assert!(before.expenses().is_empty());

        let err = repo
            .update(id, |g| {
                g.add_expense(&ids, NewExpense::new("Power", Money::from_units(60), a, SplitPolicy::Equal))?;
                g.settle(b, a, Money::from_units(1))?;
                g.settle(a, b, Money::from_units(1))?;
                Ok(())
            })
            .unwrap_err();
        assert!(matches!(err, PotluckError::NoOutstandingBalance { .. }));

        // The half-applied change was discarded
        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.expenses().len(), 1);
        assert_eq!(stored.ledger().amount_owed(b, a), Money::from_units(400));
    }

    #[test]
    fn test_update_missing_group() {
        let (_temp, repo) = create_test_repo();
        let id = SequentialIdProvider::new().group_id();
        let err = repo.update(id, |_| Ok(())).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_save_and_load() {
        let (temp, repo) = create_test_repo();
        let ids = SequentialIdProvider::new();
        let a = ids.participant_id();
        let mut group = Group::new(&ids, "Trip", vec![a, ids.participant_id()]).unwrap();
        group
            .add_expense(&ids, NewExpense::new("Fuel", Money::from_cents(4999), a, SplitPolicy::Equal))
            .unwrap();
        repo.insert(group.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = GroupRepository::new(temp.path().join("groups.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);
        assert_eq!(reloaded.get(group.id).unwrap(), Some(group));
    }
}
