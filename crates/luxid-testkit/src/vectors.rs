//! Golden test vectors for commitment derivation.
//!
//! A commitment is the plain digest of the payload bytes, so these match any
//! standard BLAKE3, SHA-256 or Keccak-256 tool. The Keccak vectors are the
//! digests an EVM ledger holds for `keccak256(utf8(rawData))`.

use luxid_core::CommitmentAlgorithm;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct CommitmentVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub algorithm: CommitmentAlgorithm,
    /// Payload bytes.
    pub payload: &'static [u8],
    /// Expected digest (hex, no prefix).
    pub expected: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<CommitmentVector> {
    use CommitmentAlgorithm::{Blake3, Keccak256, Sha256};

    vec![
        CommitmentVector {
            name: "blake3 empty payload",
            algorithm: Blake3,
            payload: b"",
            expected: "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262",
        },
        CommitmentVector {
            name: "blake3 abc",
            algorithm: Blake3,
            payload: b"abc",
            expected: "6437b3ac38465133ffb63b75273a8db548c558465d79db03fd359c6cd5bd9d85",
        },
        CommitmentVector {
            name: "sha256 empty payload",
            algorithm: Sha256,
            payload: b"",
            expected: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        },
        CommitmentVector {
            name: "sha256 abc",
            algorithm: Sha256,
            payload: b"abc",
            expected: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        },
        CommitmentVector {
            name: "sha256 LV-2025-01-Alice",
            algorithm: Sha256,
            payload: b"LV-2025-01-Alice",
            expected: "b749ad25dd9aa336803e7d1a6229ea955e83ba5a1346f0994830f5b95c092346",
        },
        CommitmentVector {
            name: "sha256 LV-2025-01-Bob",
            algorithm: Sha256,
            payload: b"LV-2025-01-Bob",
            expected: "62072043c4711dca03a2f03af14eed6daeaac27adb48114e1f98ea001751c019",
        },
        CommitmentVector {
            name: "sha256 GG-2025-07-Carol",
            algorithm: Sha256,
            payload: b"GG-2025-07-Carol",
            expected: "0e3c0901d9c919b1483c0a6d803b1f6c8ee42a2744168f510c91bce8865d37e0",
        },
        CommitmentVector {
            name: "sha256 RP-2025-03-Dave",
            algorithm: Sha256,
            payload: b"RP-2025-03-Dave",
            expected: "16ed72c975b2aebf70dfad8580ae70c65f1a3c48981512259209365ae3326f02",
        },
        CommitmentVector {
            name: "keccak256 empty payload",
            algorithm: Keccak256,
            payload: b"",
            expected: "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470",
        },
        CommitmentVector {
            name: "keccak256 abc",
            algorithm: Keccak256,
            payload: b"abc",
            expected: "4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45",
        },
        CommitmentVector {
            name: "keccak256 LV-2025-01-Alice",
            algorithm: Keccak256,
            payload: b"LV-2025-01-Alice",
            expected: "3cd6f78e7bc859d027217261dd68d705ad4e5843d805cef83ccbb3c41f0ae33b",
        },
        CommitmentVector {
            name: "keccak256 LV-2025-01-Bob",
            algorithm: Keccak256,
            payload: b"LV-2025-01-Bob",
            expected: "a8d27281dc97f1689fe9a6fa69245991b7734b39bf432e39eea37041a5acbebf",
        },
    ]
}

/// Check every vector against the current implementation.
///
/// Returns `(name, matches, actual_hex)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let actual = hex::encode(v.algorithm.commit(v.payload).as_bytes());
            (v.name.to_string(), actual == v.expected, actual)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use luxid_core::Commitment;

    #[test]
    fn test_all_vectors_match() {
        for (name, ok, actual) in verify_all_vectors() {
            assert!(ok, "vector '{}' produced {}", name, actual);
        }
    }

    #[test]
    fn test_expected_values_parse() {
        for v in all_vectors() {
            let c = Commitment::from_hex(v.expected).unwrap();
            assert_eq!(c, v.algorithm.commit(v.payload), "{}", v.name);
        }
    }

    #[test]
    fn test_sibling_payloads_differ() {
        for alg in [CommitmentAlgorithm::Sha256, CommitmentAlgorithm::Keccak256] {
            let digests: Vec<&str> = all_vectors()
                .iter()
                .filter(|v| v.algorithm == alg)
                .map(|v| v.expected)
                .collect();

            for (i, a) in digests.iter().enumerate() {
                for b in &digests[i + 1..] {
                    assert_ne!(a, b, "{alg}");
                }
            }
        }
    }
}
