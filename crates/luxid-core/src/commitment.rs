//! The commitment function: payload bytes in, 32-byte digest out.
//!
//! A commitment is the plain hash of the canonical payload, with no
//! domain-separation prefix, so any tool hashing the same bytes with the same
//! algorithm reproduces it. The algorithm is configuration, not protocol:
//! registrant and verifier only have to agree on it.
//!
//! `Keccak256` is the Ethereum-style hash (original Keccak padding, not
//! FIPS-202 SHA3-256). Digests recorded on an EVM ledger as
//! `keccak256(utf8(rawData))` verify under it unchanged.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Commitment;

/// Hash function used to derive commitments. All produce 256-bit digests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitmentAlgorithm {
    #[default]
    Blake3,
    Sha256,
    Keccak256,
}

impl CommitmentAlgorithm {
    /// Commit to a payload.
    pub fn commit(&self, payload: &[u8]) -> Commitment {
        match self {
            Self::Blake3 => Commitment(*blake3::hash(payload).as_bytes()),
            Self::Sha256 => Commitment(Sha256::digest(payload).into()),
            Self::Keccak256 => Commitment(sha3::Keccak256::digest(payload).into()),
        }
    }

    /// Stable lowercase name, as used in configuration files.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Blake3 => "blake3",
            Self::Sha256 => "sha256",
            Self::Keccak256 => "keccak256",
        }
    }
}

impl fmt::Display for CommitmentAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CommitmentAlgorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blake3" => Ok(Self::Blake3),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "keccak256" | "keccak-256" => Ok(Self::Keccak256),
            other => Err(CoreError::UnknownAlgorithm(other.to_string())),
        }
    }
}

/// Commit to a payload with the default algorithm (BLAKE3).
pub fn commit(payload: &[u8]) -> Commitment {
    CommitmentAlgorithm::default().commit(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_deterministic() {
        let p = b"LV-2025-01-Alice";
        assert_eq!(commit(p), commit(p));
        assert_eq!(
            CommitmentAlgorithm::Sha256.commit(p),
            CommitmentAlgorithm::Sha256.commit(p)
        );
    }

    #[test]
    fn test_known_digests() {
        assert_eq!(
            CommitmentAlgorithm::Blake3.commit(b"").to_hex(),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
        assert_eq!(
            CommitmentAlgorithm::Sha256.commit(b"").to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            CommitmentAlgorithm::Sha256.commit(b"LV-2025-01-Alice").to_hex(),
            "b749ad25dd9aa336803e7d1a6229ea955e83ba5a1346f0994830f5b95c092346"
        );
        // Keccak padding, so not the SHA3-256 empty digest (a7ffc6f8...)
        assert_eq!(
            CommitmentAlgorithm::Keccak256.commit(b"").to_hex(),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak_matches_ledger_digest() {
        // keccak256(utf8("LV-2025-01-Alice")) as stored by the EVM registry
        assert_eq!(
            CommitmentAlgorithm::Keccak256
                .commit(b"LV-2025-01-Alice")
                .to_prefixed_hex(),
            "0x3cd6f78e7bc859d027217261dd68d705ad4e5843d805cef83ccbb3c41f0ae33b"
        );
    }

    #[test]
    fn test_single_byte_change_changes_digest() {
        let a = b"LV-2025-01-Alice".to_vec();
        let mut b = a.clone();
        b[15] ^= 0x01;

        for alg in [
            CommitmentAlgorithm::Blake3,
            CommitmentAlgorithm::Sha256,
            CommitmentAlgorithm::Keccak256,
        ] {
            let ca = alg.commit(&a);
            let cb = alg.commit(&b);
            assert_ne!(ca, cb);
            // Avalanche: a one-bit flip should disturb most of the digest.
            let differing = ca.0.iter().zip(cb.0.iter()).filter(|(x, y)| x != y).count();
            assert!(differing > 16, "{alg}: only {differing} bytes differ");
        }
    }

    #[test]
    fn test_algorithms_disagree() {
        let p = b"same payload";
        let blake3 = CommitmentAlgorithm::Blake3.commit(p);
        let sha256 = CommitmentAlgorithm::Sha256.commit(p);
        let keccak = CommitmentAlgorithm::Keccak256.commit(p);
        assert_ne!(blake3, sha256);
        assert_ne!(sha256, keccak);
        assert_ne!(blake3, keccak);
    }

    #[test]
    fn test_algorithm_parse() {
        assert_eq!("blake3".parse::<CommitmentAlgorithm>(), Ok(CommitmentAlgorithm::Blake3));
        assert_eq!("SHA256".parse::<CommitmentAlgorithm>(), Ok(CommitmentAlgorithm::Sha256));
        assert_eq!("sha-256".parse::<CommitmentAlgorithm>(), Ok(CommitmentAlgorithm::Sha256));
        assert_eq!(
            "Keccak-256".parse::<CommitmentAlgorithm>(),
            Ok(CommitmentAlgorithm::Keccak256)
        );
        assert!(matches!(
            "sha3-256".parse::<CommitmentAlgorithm>(),
            Err(CoreError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_algorithm_serde_lowercase() {
        let json = serde_json::to_string(&CommitmentAlgorithm::Sha256).unwrap();
        assert_eq!(json, "\"sha256\"");
        let keccak: CommitmentAlgorithm = serde_json::from_str("\"keccak256\"").unwrap();
        assert_eq!(keccak, CommitmentAlgorithm::Keccak256);
    }
}
