//! Hash primitives
//!
//! Identifiers are double SHA-256 over canonical bytes; short identity
//! digests are RIPEMD-160 over a single SHA-256.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::types::{Hash160, Hash256};

/// Double SHA-256.
pub fn digest256(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    Sha256::digest(first).into()
}

/// Double SHA-256 over `a || b` without building the concatenation.
pub fn digest256_pair(a: &[u8], b: &[u8]) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    let first = hasher.finalize();
    Sha256::digest(first).into()
}

/// First four bytes of [`digest256`].
pub fn checksum32(data: &[u8]) -> [u8; 4] {
    let hash = digest256(data);
    [hash[0], hash[1], hash[2], hash[3]]
}

/// RIPEMD-160 of SHA-256.
pub fn digest160(data: &[u8]) -> Hash160 {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

/// Hex rendering in display order (byte-reversed), as identifiers are
/// conventionally shown.
pub fn hash_to_hex(hash: &Hash256) -> String {
    hash.iter().rev().map(|b| format!("{:02x}", b)).collect()
}
