//! Registry entries.

use serde::{Deserialize, Serialize};

use crate::types::{Commitment, ProductId};

/// A write-once binding of a product identifier to its commitment.
///
/// Created exactly once per identifier by a successful registration and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// The product identifier (registry key).
    pub id: ProductId,
    /// Commitment over the product's canonical payload.
    pub commitment: Commitment,
    /// When the entry was created (Unix ms).
    pub registered_at: i64,
}

impl RegistryEntry {
    pub fn new(id: ProductId, commitment: Commitment, registered_at: i64) -> Self {
        Self {
            id,
            commitment,
            registered_at,
        }
    }
}
