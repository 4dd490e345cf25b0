//! Unlocked-project records and the key-value store they persist to.
//!
//! Storage is best effort. Read failures load as empty and write failures
//! are logged; neither ever reaches the caller.

use crate::catalog::Project;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const STORAGE_KEY: &str = "collectedProjects";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage rejected write: {0}")]
    Rejected(String),
    #[error("malformed stored document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Minimal string key-value store (browser `localStorage` or in-memory).
pub trait PersistenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: FnvHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRecord {
    pub project: Project,
    /// The full ordered selection at the moment of unlock.
    pub used_keywords: Vec<String>,
}

/// Stored as a list in unlock order; an object keyed by project id is also
/// accepted on load.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredRecords {
    List(Vec<UnlockRecord>),
    ById(BTreeMap<String, UnlockRecord>),
}

pub struct UnlockedProjects {
    records: Vec<UnlockRecord>,
    store: Box<dyn PersistenceStore>,
}

impl UnlockedProjects {
    /// Load from `store`. Anything unreadable loads as empty.
    pub fn load(store: Box<dyn PersistenceStore>) -> Self {
        let records = match Self::read(store.as_ref()) {
            Ok(records) => records,
            Err(e) => {
                log::warn!("[store] ignoring stored projects: {e}");
                Vec::new()
            }
        };
        log::info!("[store] loaded {} unlocked projects", records.len());
        Self { records, store }
    }

    fn read(store: &dyn PersistenceStore) -> Result<Vec<UnlockRecord>, StoreError> {
        let Some(text) = store.get(STORAGE_KEY)? else {
            return Ok(Vec::new());
        };
        let mut records = match serde_json::from_str::<StoredRecords>(&text)? {
            StoredRecords::List(list) => list,
            StoredRecords::ById(map) => map.into_values().collect(),
        };
        let mut seen = fnv::FnvHashSet::default();
        records.retain(|r| seen.insert(r.project.id.clone()));
        Ok(records)
    }

    fn write(&mut self) {
        let result = serde_json::to_string(&self.records)
            .map_err(StoreError::from)
            .and_then(|text| self.store.set(STORAGE_KEY, &text));
        if let Err(e) = result {
            log::warn!("[store] keeping unlocks in memory only: {e}");
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.project.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&UnlockRecord> {
        self.records.iter().find(|r| r.project.id == id)
    }

    /// Records in unlock order.
    pub fn records(&self) -> &[UnlockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add and persist a record. An id already present is left untouched and
    /// false is returned.
    pub fn insert(&mut self, project: Project, used_keywords: Vec<String>) -> bool {
        if self.contains(&project.id) {
            return false;
        }
        log::info!("[store] unlocked {}", project.id);
        self.records.push(UnlockRecord {
            project,
            used_keywords,
        });
        self.write();
        true
    }

    /// Drop every record and the stored document.
    pub fn clear(&mut self) {
        self.records.clear();
        if let Err(e) = self.store.remove(STORAGE_KEY) {
            log::warn!("[store] failed to clear stored projects: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Memory store whose contents outlive the `UnlockedProjects` that owns it.
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl PersistenceStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.0.borrow().get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.0.borrow_mut().set(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.0.borrow_mut().remove(key)
        }
    }

    struct BrokenStore;

    impl PersistenceStore for BrokenStore {
        fn get(&self, _: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn set(&mut self, _: &str, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Rejected("quota".into()))
        }
        fn remove(&mut self, _: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn project(id: &str) -> Project {
        Catalog::builtin().get(id).cloned().unwrap()
    }

    #[test]
    fn insert_is_idempotent_and_survives_reload() {
        let shared = SharedStore::default();
        let mut unlocked = UnlockedProjects::load(Box::new(shared.clone()));
        assert!(unlocked.insert(project("flux-state"), vec!["FLOW".into(), "DATA".into(), "CHAOS".into()]));
        assert!(!unlocked.insert(project("flux-state"), vec!["X".into()]));
        assert_eq!(unlocked.get("flux-state").unwrap().used_keywords[0], "FLOW");

        let reloaded = UnlockedProjects::load(Box::new(shared.clone()));
        assert_eq!(reloaded.records(), unlocked.records());
    }

    #[test]
    fn clear_removes_stored_document() {
        let shared = SharedStore::default();
        let mut unlocked = UnlockedProjects::load(Box::new(shared.clone()));
        unlocked.insert(project("void-interface"), vec![]);
        unlocked.clear();
        assert!(unlocked.is_empty());
        assert_eq!(shared.get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn legacy_object_document_loads() {
        let mut shared = SharedStore::default();
        let rec = UnlockRecord {
            project: project("signal-noise"),
            used_keywords: vec!["SIGNAL".into()],
        };
        let mut map = BTreeMap::new();
        map.insert("signal-noise".to_string(), rec.clone());
        shared
            .set(STORAGE_KEY, &serde_json::to_string(&map).unwrap())
            .unwrap();
        let unlocked = UnlockedProjects::load(Box::new(shared));
        assert_eq!(unlocked.records(), [rec]);
    }

    #[test]
    fn garbage_and_failures_degrade_to_memory() {
        let mut shared = SharedStore::default();
        shared.set(STORAGE_KEY, "{not json").unwrap();
        assert!(UnlockedProjects::load(Box::new(shared)).is_empty());

        let mut broken = UnlockedProjects::load(Box::new(BrokenStore));
        assert!(broken.insert(project("echo-chamber"), vec![]));
        assert!(broken.contains("echo-chamber"));
        broken.clear();
        assert!(broken.is_empty());
    }
}
