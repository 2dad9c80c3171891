//! Stable content digests for schemas
//!
//! The digest is the cache key upstream callers use to reuse an analysis of an
//! identical page, so it must depend only on schema content.

use sha2::{Digest, Sha256};

use crate::schema::UnifiedSchema;

/// SHA-256 over arbitrary bytes, lower-case hex
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

impl UnifiedSchema {
    /// Content fingerprint of the schema (SHA-256 of its canonical JSON)
    pub fn fingerprint(&self) -> String {
        // Struct fields serialize in declaration order and `source` is an
        // ordered set, so the JSON encoding is canonical.
        match serde_json::to_vec(self) {
            Ok(bytes) => sha256_hex(&bytes),
            Err(_) => sha256_hex(self.page_meta.page_url.as_bytes()),
        }
    }
}
