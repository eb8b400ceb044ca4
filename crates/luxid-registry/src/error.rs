//! Error types for the registry.

use luxid_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
///
/// Rejected registrations and all verification outcomes are not errors;
/// they are returned inside `Ok`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Catalog could not be parsed.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Product is not listed in the catalog.
    #[error("product not in catalog: {0}")]
    UnknownProduct(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RegistryError {
    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RegistryError::Store(e) if e.is_retryable())
    }
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
