//! Bounded-window base64 encoding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Window size for incremental encoding: 32 KiB rounded down to a multiple
/// of 3, so each window encodes without padding and the per-window outputs
/// concatenate into one valid base64 stream.
const ENCODE_WINDOW: usize = 32 * 1024 - (32 * 1024 % 3);

/// Encode `bytes` to a single base64 string, one bounded window at a time.
pub fn encode_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len().div_ceil(3) * 4);
    for window in bytes.chunks(ENCODE_WINDOW) {
        STANDARD.encode_string(window, &mut out);
    }
    out
}
