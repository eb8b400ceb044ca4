//! RegistryStore trait: the abstract interface for entry persistence.
//!
//! This trait keeps the registry storage-agnostic. Implementations include
//! SQLite (durable) and in-memory.

use std::sync::Arc;

use async_trait::async_trait;
use luxid_core::{Commitment, ProductId, RegistryEntry};

use crate::error::Result;

/// Result of a compare-and-set write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutResult {
    /// The entry was written.
    Created,
    /// An entry for this id already exists; nothing was written.
    AlreadyExists,
}

/// The RegistryStore trait: async interface for write-once entries.
///
/// # Contract
///
/// - **Atomic compare-and-set**: `put_if_absent` writes only when no entry
///   exists for the id. If several callers race on one id, exactly one sees
///   `Created` and the rest see `AlreadyExists`.
/// - **Immutability**: a stored entry is never overwritten or deleted.
/// - **Monotonic reads**: once a read observes an entry, later reads do too.
#[async_trait]
pub trait RegistryStore: Send + Sync {
    /// Write `entry` if its id is absent.
    async fn put_if_absent(&self, entry: &RegistryEntry) -> Result<PutResult>;

    /// Get the stored commitment for an id.
    async fn get(&self, id: &ProductId) -> Result<Option<Commitment>>;

    /// Get the full entry for an id.
    async fn get_entry(&self, id: &ProductId) -> Result<Option<RegistryEntry>>;

    /// Check if an entry exists.
    async fn exists(&self, id: &ProductId) -> Result<bool>;

    /// Number of entries.
    async fn count(&self) -> Result<u64>;

    /// All registered ids, sorted.
    async fn list_ids(&self) -> Result<Vec<ProductId>>;
}

#[async_trait]
impl<S: RegistryStore + ?Sized> RegistryStore for Arc<S> {
    async fn put_if_absent(&self, entry: &RegistryEntry) -> Result<PutResult> {
        (**self).put_if_absent(entry).await
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Commitment>> {
        (**self).get(id).await
    }

    async fn get_entry(&self, id: &ProductId) -> Result<Option<RegistryEntry>> {
        (**self).get_entry(id).await
    }

    async fn exists(&self, id: &ProductId) -> Result<bool> {
        (**self).exists(id).await
    }

    async fn count(&self) -> Result<u64> {
        (**self).count().await
    }

    async fn list_ids(&self) -> Result<Vec<ProductId>> {
        (**self).list_ids().await
    }
}
