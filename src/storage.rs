use crate::core::{MemoryStore, PersistenceStore, StoreError};
use web_sys as web;

/// `window.localStorage` behind the core's store trait.
pub struct LocalStore {
    storage: web::Storage,
}

impl LocalStore {
    pub fn open() -> Option<Self> {
        let storage = web::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl PersistenceStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Quota exhaustion and private-mode denials both surface here
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Rejected(format!("{:?}", e)))
    }
}

/// localStorage when the browser allows it, otherwise an in-memory store
/// that lasts for the page.
pub fn open_store() -> Box<dyn PersistenceStore> {
    match LocalStore::open() {
        Some(s) => Box::new(s),
        None => {
            log::warn!("[store] localStorage unavailable; unlocks will not persist");
            Box::new(MemoryStore::new())
        }
    }
}
