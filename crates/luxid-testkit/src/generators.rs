//! Proptest generators for property-based testing.

use proptest::prelude::*;

use luxid_core::{Commitment, CommitmentAlgorithm};

/// Generate a label-style product identifier, e.g. `LV-2025-01`.
pub fn product_id() -> impl Strategy<Value = String> {
    "[A-Z]{2}-20[0-9]{2}-[0-9]{2}(-[A-Za-z0-9]{1,16})?".prop_map(String::from)
}

/// Generate any printable ASCII identifier within the default 128-byte limit.
pub fn printable_id() -> impl Strategy<Value = String> {
    "[ -~]{1,128}".prop_map(String::from)
}

/// Generate an identifier that fails validation under the default limit.
pub fn invalid_product_id() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Z0-9-]{129,200}".prop_map(String::from),
        r"[A-Z]{1,8}[\x00-\x1f\x7f][A-Z0-9-]{0,8}".prop_map(String::from),
    ]
}

/// Generate payload bytes of specified max length.
pub fn payload(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a random Commitment.
pub fn commitment() -> impl Strategy<Value = Commitment> {
    any::<[u8; 32]>().prop_map(Commitment::from_bytes)
}

/// Generate a CommitmentAlgorithm.
pub fn algorithm() -> impl Strategy<Value = CommitmentAlgorithm> {
    prop_oneof![
        Just(CommitmentAlgorithm::Blake3),
        Just(CommitmentAlgorithm::Sha256),
        Just(CommitmentAlgorithm::Keccak256),
    ]
}
