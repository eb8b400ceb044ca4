//! # LuxID Registry
//!
//! Product-authenticity registry: manufacturers register a commitment to
//! each product's descriptive payload, and anyone can later check a claimed
//! payload against it.
//!
//! ## Overview
//!
//! - **Registration**: binds a product identifier to a commitment, exactly
//!   once. The first writer wins; entries are never updated or deleted.
//! - **Verification**: answers `Authentic`, `Fake` or `NotFound` for an
//!   `(id, payload)` pair without mutating anything.
//! - **Audit events**: one event per successful registration, delivered to a
//!   pluggable [`EventSink`].
//! - **Catalog reports**: catalog-backed verification producing a JSON-ready
//!   [`VerificationReport`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use luxid_registry::{Registry, RegistryConfig, RegisterResult};
//! use luxid_registry::store::SqliteStore;
//!
//! async fn example() -> luxid_registry::Result<()> {
//!     let store = SqliteStore::open("registry.db")?;
//!     let registry = Registry::open(store, RegistryConfig::default())?;
//!
//!     match registry.register("LV-2025-01", b"LV-2025-01-Alice").await? {
//!         RegisterResult::Registered(entry) => println!("registered {}", entry.id),
//!         RegisterResult::Rejected(reason) => println!("rejected: {:?}", reason),
//!     }
//!
//!     let outcome = registry.verify("LV-2025-01", b"LV-2025-01-Alice").await?;
//!     println!("{}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `luxid_registry::core` - Identifiers, commitments, outcomes
//! - `luxid_registry::store` - Storage abstraction, memory and SQLite backends

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod registry;
pub mod report;

pub use catalog::{Catalog, ProductRecord};
pub use config::RegistryConfig;
pub use error::{RegistryError, Result};
pub use events::{EventSink, LogFileSink, MemorySink, RegistrationEvent, TracingSink};
pub use registry::{RegisterResult, RejectReason, Registry};
pub use report::{ProductInfo, VerificationReport};

pub use luxid_core as core;
pub use luxid_store as store;

pub use luxid_core::{
    commit, Commitment, CommitmentAlgorithm, ProductId, RegistryEntry, VerificationOutcome,
};
pub use luxid_store::{MemoryStore, RegistryStore, SqliteStore, StoreError};
