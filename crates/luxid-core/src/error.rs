//! Error types for the LuxID core.

use thiserror::Error;

/// Errors produced when parsing core values from external representations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid commitment length: expected 32 bytes, got {0}")]
    InvalidLength(usize),

    #[error("unknown commitment algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Product identifier validation failures.
///
/// These are caller mistakes: they are surfaced directly and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("product id is empty")]
    Empty,

    #[error("product id is {len} bytes, maximum is {max}")]
    TooLong { len: usize, max: usize },

    #[error("product id contains a non-printable character at byte {0}")]
    NotPrintable(usize),
}
