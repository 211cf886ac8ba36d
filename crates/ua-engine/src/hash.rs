//! Hashing utilities for rule tables.

use crate::error::Result;
use crate::table::RuleTableSpec;
use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of data and returns hex string.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    hex::encode(result)
}

/// Computes a rule table fingerprint.
///
/// The document is rendered as compact JSON first. Field order follows the
/// struct definitions, and version patterns and category sets are sorted,
/// so equal tables always render identically.
pub fn fingerprint(spec: &RuleTableSpec) -> Result<String> {
    let canonical = serde_json::to_vec(spec)?;
    Ok(format!("t:{}", sha256_hex(&canonical)))
}
