// crates/orion-core/src/crypto.rs

use sha2::{Digest, Sha256};

/// Name of the digest algorithm, used as the proof reference tag.
pub const DIGEST_ALGORITHM: &str = "sha256";

/// Number of hex characters shown in a proof reference.
pub const PROOF_PREFIX_LEN: usize = 16;

/// Compute SHA-256 hash of the given bytes.
///
/// Returns a 32-byte hash.
pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Compute the lowercase hex SHA-256 digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(hash_bytes(data))
}

/// Whether `s` looks like a full hex SHA-256 digest (64 lowercase hex chars).
pub fn is_hex_digest(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Human-presented proof reference: `"sha256:<first 16 hex chars>"`.
pub fn proof_reference(digest_hex: &str) -> String {
    let prefix: String = digest_hex.chars().take(PROOF_PREFIX_LEN).collect();
    format!("{}:{}", DIGEST_ALGORITHM, prefix)
}
