//! `hedra process <file>` – run the full pipeline on one lecture.

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use hedra_core::artifact::ArtifactKind;
use hedra_core::config::{self, HedraConfig};
use hedra_core::history_db::HistoryDb;
use hedra_core::pipeline;
use hedra_core::upstream::UpstreamClient;

/// Process a lecture file and print the generated artifact to stdout.
/// Progress goes to stderr so stdout stays pipeable.
pub async fn run_process(
    db: &HistoryDb,
    cfg: &HedraConfig,
    file: &Path,
    artifact: ArtifactKind,
) -> Result<()> {
    let api_key = config::api_key()?;
    let client = UpstreamClient::new(&cfg.api_base_url, &cfg.model, &api_key, cfg.request_timeout())?;
    let policy = cfg.retry_policy();

    let outcome = pipeline::process_lecture(
        db,
        &client,
        &policy,
        cfg.chunk_size(),
        file,
        artifact,
        |pct, stage| {
            eprint!("\r[{pct:>3}%] {stage:<12}");
            let _ = std::io::stderr().flush();
        },
    )
    .await?;
    eprintln!();

    println!("{}", outcome.text);
    eprintln!("Saved as lecture {} ({})", outcome.lecture_id, artifact);
    Ok(())
}
