//! Chunked file reading and base64 encoding for lecture uploads.
//!
//! Large files are read in bounded chunks with a cooperative yield between
//! reads so the runtime stays responsive, then encoded to one base64 string.
//! The read phase reports progress up to [`READ_PHASE_CEILING`]; the rest of
//! the percentage range belongs to the caller's upload/processing phase.

mod b64;
mod read;
mod state;

pub use b64::encode_bytes;
pub use read::{encode_file, read_chunks};
pub use state::ChunkReadState;

/// Default read chunk size: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Progress ceiling of the read phase (percent). Reading is the first
/// two-fifths of the pipeline; upload/generation owns the remaining 60.
pub const READ_PHASE_CEILING: u8 = 40;
