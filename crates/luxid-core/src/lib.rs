//! # LuxID Core
//!
//! Pure primitives for the LuxID product-authenticity registry: product
//! identifiers, payload commitments, registry entries, and the three-way
//! verification outcome.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over identifiers and digests.
//!
//! ## Key Types
//!
//! - [`ProductId`] - Validated, printable product identifier (the registry key)
//! - [`Commitment`] - 32-byte digest binding a product's descriptive payload
//! - [`CommitmentAlgorithm`] - The hash used to derive commitments
//! - [`RegistryEntry`] - A write-once `(id, commitment, registered_at)` record
//! - [`VerificationOutcome`] - `NotFound`, `Authentic`, or `Fake`
//!
//! ## Commitments
//!
//! A commitment is the plain hash of the canonical payload bytes. Producer and
//! verifier must agree on the algorithm; see [`commitment`].

pub mod commitment;
pub mod entry;
pub mod error;
pub mod outcome;
pub mod types;
pub mod validation;

pub use commitment::{commit, CommitmentAlgorithm};
pub use entry::RegistryEntry;
pub use error::{CoreError, ValidationError};
pub use outcome::VerificationOutcome;
pub use types::{Commitment, ProductId};
pub use validation::{validate_product_id, DEFAULT_MAX_ID_LEN, MAX_ID_LEN_LIMIT};
