//! # LuxID Store
//!
//! Storage abstraction for the LuxID registry. Provides a trait-based
//! interface for write-once entry persistence with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The registry is storage-agnostic: it talks to the [`RegistryStore`] trait.
//! The durable implementation is [`SqliteStore`], with [`MemoryStore`] for
//! tests and single-node deployments.
//!
//! ## Key Types
//!
//! - [`RegistryStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage
//! - [`PutResult`] - Result of a compare-and-set write
//! - [`StoreError`] - Storage failures, split into retryable and final
//!
//! ## Usage
//!
//! ```rust,no_run
//! use luxid_core::{commit, ProductId, RegistryEntry};
//! use luxid_store::{PutResult, RegistryStore, SqliteStore};
//!
//! async fn example() {
//!     let store = SqliteStore::open("registry.db").unwrap();
//!
//!     let id = ProductId::try_from("LV-2025-01").unwrap();
//!     let entry = RegistryEntry::new(id, commit(b"LV-2025-01-Alice"), 1736870400000);
//!     let result = store.put_if_absent(&entry).await.unwrap();
//!     assert_eq!(result, PutResult::Created);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Write-once**: `put_if_absent` never overwrites; a second write for the
//!   same id returns `AlreadyExists`, even under concurrent callers
//! - **Monotonic reads**: entries are never deleted, so an entry once observed
//!   stays observable
//! - **No retries**: backends report failures, callers decide whether to retry

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{PutResult, RegistryStore};
