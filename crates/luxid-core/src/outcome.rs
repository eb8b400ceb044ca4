//! The three-way verification outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Commitment;

/// Result of checking a claimed payload against the registry.
///
/// All three variants are expected end states, never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// No entry exists for the identifier.
    NotFound,
    /// The stored commitment equals the one computed from the payload.
    Authentic,
    /// An entry exists but its commitment differs.
    Fake,
}

impl VerificationOutcome {
    /// Classify a stored commitment against the expected one.
    pub fn classify(stored: Option<&Commitment>, expected: &Commitment) -> Self {
        match stored {
            None => Self::NotFound,
            Some(stored) if stored == expected => Self::Authentic,
            Some(_) => Self::Fake,
        }
    }

    pub fn is_authentic(&self) -> bool {
        matches!(self, Self::Authentic)
    }

    /// Stable lowercase label (`authentic`, `fake`, `not_found`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Authentic => "authentic",
            Self::Fake => "fake",
        }
    }

    /// Conventional process exit code for verification tooling:
    /// 0 = authentic, 1 = fake, 2 = not found.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Authentic => 0,
            Self::Fake => 1,
            Self::NotFound => 2,
        }
    }
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
