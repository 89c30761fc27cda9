//! Password digests.
//!
//! Single-round, unsalted SHA-256 rendered as lowercase hex. This matches the
//! digests already stored by earlier deployments of the tool and is NOT a
//! password-hashing scheme suitable for hostile environments.

use sha2::{Digest, Sha256};

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

pub fn verify_password(password: &str, expected_hash: &str) -> bool {
    hash_password(password).eq_ignore_ascii_case(expected_hash)
}
