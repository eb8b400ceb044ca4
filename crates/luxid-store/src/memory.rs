//! In-memory implementation of the RegistryStore trait.
//!
//! Same semantics as SQLite but nothing is persisted. Suitable for tests and
//! single-node deployments where the registry lives as long as the process.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use luxid_core::{Commitment, ProductId, RegistryEntry};

use crate::error::{Result, StoreError};
use crate::traits::{PutResult, RegistryStore};

/// In-memory store implementation.
///
/// Thread-safe via RwLock. The compare-and-set in `put_if_absent` runs
/// entirely under the write lock.
pub struct MemoryStore {
    entries: RwLock<HashMap<ProductId, RegistryEntry>>,
    /// Maximum number of entries, if bounded.
    capacity: Option<usize>,
}

impl MemoryStore {
    /// Create a new empty, unbounded in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: None,
        }
    }

    /// Create a store that rejects new entries once `max_entries` exist.
    pub fn with_capacity_limit(max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity: Some(max_entries),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ProductId, RegistryEntry>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<ProductId, RegistryEntry>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryStore for MemoryStore {
    async fn put_if_absent(&self, entry: &RegistryEntry) -> Result<PutResult> {
        let mut entries = self.write()?;

        if entries.contains_key(&entry.id) {
            return Ok(PutResult::AlreadyExists);
        }

        if let Some(max) = self.capacity {
            if entries.len() >= max {
                return Err(StoreError::Rejected(format!(
                    "capacity of {} entries reached",
                    max
                )));
            }
        }

        entries.insert(entry.id.clone(), entry.clone());
        Ok(PutResult::Created)
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Commitment>> {
        let entries = self.read()?;
        Ok(entries.get(id).map(|e| e.commitment))
    }

    async fn get_entry(&self, id: &ProductId) -> Result<Option<RegistryEntry>> {
        let entries = self.read()?;
        Ok(entries.get(id).cloned())
    }

    async fn exists(&self, id: &ProductId) -> Result<bool> {
        let entries = self.read()?;
        Ok(entries.contains_key(id))
    }

    async fn count(&self) -> Result<u64> {
        let entries = self.read()?;
        Ok(entries.len() as u64)
    }

    async fn list_ids(&self) -> Result<Vec<ProductId>> {
        let entries = self.read()?;
        let mut ids: Vec<ProductId> = entries.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}
