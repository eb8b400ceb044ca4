//! # LuxID Testkit
//!
//! Testing utilities for the LuxID registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known payload digests for each commitment algorithm
//! - **Generators**: Proptest strategies for identifiers and payloads
//! - **Fixtures**: A registry over a memory store, preloaded with a sample catalog
//! - **Fault injection**: A store wrapper that fails on demand and counts calls
//!
//! ## Golden Vectors
//!
//! ```rust
//! use luxid_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok, hex) in verify_all_vectors() {
//!     assert!(ok, "{}: got {}", name, hex);
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,ignore
//! use luxid_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! fixture.register_catalog().await;
//! let report = fixture.verify_report("LV-2025-01").await;
//! ```

pub mod faulty;
pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use faulty::{Fault, FaultyStore};
pub use fixtures::{entry, sample_catalog, TestFixture, SAMPLE_CATALOG_JSON};
pub use generators::{invalid_product_id, payload, product_id};
pub use vectors::{all_vectors, verify_all_vectors, CommitmentVector};
