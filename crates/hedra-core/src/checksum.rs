//! Content checksums for history bookkeeping.
//!
//! The pipeline already holds the full lecture in memory after the chunked
//! read, so the digest is computed over that buffer rather than re-reading
//! the file from disk.

use sha2::{Digest, Sha256};

/// SHA-256 of a buffer as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
