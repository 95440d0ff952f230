//! Ordered chunk reads with a cooperative yield between chunks.

use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::AsyncReadExt;

use super::state::ChunkReadState;

/// Read `path` in `chunk_size` pieces, strictly in ascending order.
///
/// Invokes `progress` once per chunk with the read-phase percent (0..=40)
/// and yields to the scheduler between reads so a large file never
/// monopolizes the task. Any read error aborts the whole operation; no
/// partial buffer is ever returned.
pub async fn read_chunks<F>(path: &Path, chunk_size: usize, mut progress: F) -> Result<Vec<u8>>
where
    F: FnMut(u8),
{
    let mut file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("open {}", path.display()))?;
    let file_size = file
        .metadata()
        .await
        .with_context(|| format!("stat {}", path.display()))?
        .len();

    let mut state = ChunkReadState::new(file_size, chunk_size);
    let mut remaining = file_size;
    let mut buf = vec![0u8; chunk_size.max(1)];
    while remaining > 0 {
        let take = remaining.min(buf.len() as u64) as usize;
        file.read_exact(&mut buf[..take])
            .await
            .with_context(|| format!("read {}", path.display()))?;
        let percent = state.push_chunk(&buf[..take]);
        progress(percent);
        remaining -= take as u64;
        // Let other tasks and timers run before the next read.
        tokio::task::yield_now().await;
    }

    debug_assert!(state.is_complete());
    Ok(state.into_bytes())
}

/// Read `path` chunk by chunk and return its contents as one base64 string.
pub async fn encode_file<F>(path: &Path, chunk_size: usize, progress: F) -> Result<String>
where
    F: FnMut(u8),
{
    let bytes = read_chunks(path, chunk_size, progress).await?;
    Ok(super::b64::encode_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::DEFAULT_CHUNK_SIZE;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use std::io::Write;

    fn temp_file_with(content: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content).unwrap();
        f.flush().unwrap();
        f
    }

    fn patterned(len: usize) -> Vec<u8> {
        (0u8..=255).cycle().take(len).collect()
    }

    #[tokio::test]
    async fn progress_fires_once_per_chunk_and_ends_at_forty() {
        const MIB: usize = 1024 * 1024;
        for size in [1usize, MIB - 1, MIB, MIB + 1, 9 * MIB] {
            let content = patterned(size);
            let f = temp_file_with(&content);
            let mut seen: Vec<u8> = Vec::new();
            let bytes = read_chunks(f.path(), DEFAULT_CHUNK_SIZE, |p| seen.push(p))
                .await
                .unwrap();
            assert_eq!(bytes, content, "size {size}");
            let expected_calls = size.div_ceil(MIB);
            assert_eq!(seen.len(), expected_calls, "size {size}");
            assert!(seen.windows(2).all(|w| w[0] < w[1]), "size {size}: {seen:?}");
            assert_eq!(*seen.last().unwrap(), 40, "size {size}");
        }
    }

    #[tokio::test]
    async fn empty_file_reports_no_progress() {
        let f = temp_file_with(b"");
        let mut seen: Vec<u8> = Vec::new();
        let bytes = read_chunks(f.path(), DEFAULT_CHUNK_SIZE, |p| seen.push(p))
            .await
            .unwrap();
        assert!(bytes.is_empty());
        assert!(seen.is_empty());
        let encoded = encode_file(f.path(), DEFAULT_CHUNK_SIZE, |_| {}).await.unwrap();
        assert_eq!(encoded, "");
    }

    #[tokio::test]
    async fn encode_file_round_trips() {
        const MIB: usize = 1024 * 1024;
        for size in [0usize, 1, MIB - 1, MIB, MIB + 1, 9 * MIB] {
            let content = patterned(size);
            let f = temp_file_with(&content);
            let encoded = encode_file(f.path(), DEFAULT_CHUNK_SIZE, |_| {}).await.unwrap();
            let decoded = STANDARD.decode(&encoded).unwrap();
            assert_eq!(decoded, content, "size {size}");
        }
    }

    #[tokio::test]
    async fn small_chunk_size_preserves_order() {
        let content = b"the quick brown fox jumps over the lazy dog".to_vec();
        let f = temp_file_with(&content);
        let mut seen: Vec<u8> = Vec::new();
        let bytes = read_chunks(f.path(), 7, |p| seen.push(p)).await.unwrap();
        assert_eq!(bytes, content);
        assert_eq!(seen.len(), content.len().div_ceil(7));
        assert_eq!(*seen.last().unwrap(), 40);
    }

    #[tokio::test]
    async fn missing_file_propagates_error() {
        let err = read_chunks(Path::new("/nonexistent/hedra-test"), 1024, |_| {})
            .await
            .unwrap_err();
        assert!(err.to_string().contains("open"));
    }
}
