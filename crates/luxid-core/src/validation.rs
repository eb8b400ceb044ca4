//! Product identifier validation.

use crate::error::ValidationError;

/// Default maximum identifier length in bytes.
pub const DEFAULT_MAX_ID_LEN: usize = 128;

/// Hard ceiling on identifier length; configured limits may not exceed it.
pub const MAX_ID_LEN_LIMIT: usize = 1024;

/// Validate a product identifier.
///
/// Checks run in a fixed order and the first failure wins:
/// 1. Non-empty
/// 2. At most `max_len` bytes
/// 3. No control characters
pub fn validate_product_id(id: &str, max_len: usize) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::Empty);
    }

    if id.len() > max_len {
        return Err(ValidationError::TooLong {
            len: id.len(),
            max: max_len,
        });
    }

    if let Some((pos, _)) = id.char_indices().find(|(_, c)| c.is_control()) {
        return Err(ValidationError::NotPrintable(pos));
    }

    Ok(())
}
