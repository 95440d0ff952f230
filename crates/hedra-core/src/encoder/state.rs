//! Accumulation state for one in-flight chunked read.

use super::READ_PHASE_CEILING;

/// Bookkeeping for a single read operation. Owned exclusively by that
/// operation and dropped when it completes or fails; a concurrent read of
/// another file gets its own independent state.
#[derive(Debug)]
pub struct ChunkReadState {
    total_chunks: u64,
    current_chunk: u64,
    accumulated: Vec<u8>,
}

impl ChunkReadState {
    /// Plan a read of `file_size` bytes in chunks of `chunk_size`.
    pub fn new(file_size: u64, chunk_size: usize) -> Self {
        let chunk = chunk_size.max(1) as u64;
        Self {
            total_chunks: file_size.div_ceil(chunk),
            current_chunk: 0,
            accumulated: Vec::with_capacity(file_size as usize),
        }
    }

    /// Record one chunk read in order; returns the read-phase percent.
    ///
    /// Invariant: `current_chunk` only grows, and the accumulated length is
    /// the sum of all chunk sizes pushed so far.
    pub fn push_chunk(&mut self, data: &[u8]) -> u8 {
        self.current_chunk += 1;
        self.accumulated.extend_from_slice(data);
        self.percent()
    }

    /// Read-phase progress: `round(current / total * 40)`.
    pub fn percent(&self) -> u8 {
        if self.total_chunks == 0 {
            return READ_PHASE_CEILING;
        }
        let fraction = self.current_chunk as f64 / self.total_chunks as f64;
        (fraction * f64::from(READ_PHASE_CEILING)).round() as u8
    }

    pub fn total_chunks(&self) -> u64 {
        self.total_chunks
    }

    pub fn current_chunk(&self) -> u64 {
        self.current_chunk
    }

    pub fn is_complete(&self) -> bool {
        self.current_chunk >= self.total_chunks
    }

    /// Bytes read so far.
    pub fn len(&self) -> usize {
        self.accumulated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulated.is_empty()
    }

    /// Consume the state, keeping the accumulated bytes in original order.
    pub fn into_bytes(self) -> Vec<u8> {
        self.accumulated
    }
}
