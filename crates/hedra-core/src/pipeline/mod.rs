//! End-to-end lecture processing.
//!
//! One run: validate the media kind, record a history row, read and encode
//! the file in chunks (progress 0..40), then call the upstream service
//! through the retrying executor (coarse milestones 40..100) and settle the
//! history row and usage counter.

use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::artifact::ArtifactKind;
use crate::checksum;
use crate::encoder::{self, READ_PHASE_CEILING};
use crate::history_db::{HistoryDb, LectureId, NewLecture};
use crate::retry::{run_with_retry, RequestError, RetryPolicy};
use crate::upstream::{GenerateRequest, InlineData, UpstreamClient};

/// Result of one successful pipeline run.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub lecture_id: LectureId,
    /// Generated artifact text, as returned by the model.
    pub text: String,
}

/// Process one lecture file into the requested artifact.
///
/// `progress` receives `(percent, stage)` pairs; percentages are monotonic
/// within a run. Failures after the history row exists mark it failed with
/// the classified error; the returned error carries only a sanitized
/// message, never the raw vendor payload.
pub async fn process_lecture<F>(
    db: &HistoryDb,
    client: &UpstreamClient,
    policy: &RetryPolicy,
    chunk_size: usize,
    path: &Path,
    kind: ArtifactKind,
    mut progress: F,
) -> Result<PipelineOutcome>
where
    F: FnMut(u8, &str),
{
    let (_, mime) = crate::media::detect(path)
        .ok_or_else(|| anyhow!("unsupported file type: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    progress(0, "reading");
    let bytes = encoder::read_chunks(path, chunk_size, |pct| progress(pct, "reading"))
        .await
        .with_context(|| format!("reading {}", path.display()))?;

    let digest = checksum::sha256_hex(&bytes);
    let lecture_id = db
        .add_lecture(&NewLecture {
            file_name: &file_name,
            file_size: bytes.len() as i64,
            sha256: &digest,
            mime_type: mime,
            artifact_kind: kind.as_str(),
        })
        .await
        .context("recording lecture")?;
    tracing::info!(lecture_id, file = %file_name, kind = %kind, "processing lecture");

    progress(READ_PHASE_CEILING, "encoding");
    let request = GenerateRequest {
        prompt: kind.prompt().to_string(),
        inline_data: Some(InlineData {
            mime_type: mime.to_string(),
            data_base64: encoder::encode_bytes(&bytes),
        }),
    };
    drop(bytes);

    progress(55, "generating");
    let result = run_with_retry(policy, || {
        let client = client.clone();
        let request = request.clone();
        async move {
            tokio::task::spawn_blocking(move || client.generate(&request))
                .await
                .map_err(anyhow::Error::new)?
                .map_err(anyhow::Error::new)
        }
    })
    .await;

    match result {
        Ok(text) => {
            db.mark_completed(lecture_id).await?;
            db.bump_usage(kind.as_str()).await?;
            progress(100, "done");
            tracing::info!(lecture_id, "lecture processed");
            Ok(PipelineOutcome { lecture_id, text })
        }
        Err(err) => {
            // Full detail goes to the log; the history row and the returned
            // error only carry classified text, never the raw vendor payload.
            tracing::warn!(lecture_id, "generation failed: {err}");
            let detail = match &err {
                RequestError::QuotaExhausted { attempts, .. } => {
                    format!("quota exhausted after {attempts} attempts")
                }
                RequestError::PayloadTooLarge(_) => "payload too large".to_string(),
                RequestError::InvalidArgument(_) => "invalid argument".to_string(),
                RequestError::Upstream(_) => "upstream failure".to_string(),
            };
            db.mark_failed(lecture_id, &detail).await?;
            Err(anyhow!("{}", err.user_message()))
        }
    }
}
