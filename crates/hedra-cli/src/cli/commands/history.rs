//! `hedra history` – show the processing history.

use anyhow::Result;
use hedra_core::history_db::HistoryDb;

pub async fn run_history(db: &HistoryDb) -> Result<()> {
    let records = db.list_lectures().await?;
    if records.is_empty() {
        println!("No lectures processed yet.");
        return Ok(());
    }

    println!(
        "{:<6} {:<11} {:<12} {:<10} {}",
        "ID", "STATUS", "ARTIFACT", "SIZE", "FILE"
    );
    for r in records {
        println!(
            "{:<6} {:<11} {:<12} {:<10} {}",
            r.id,
            r.status.as_str(),
            r.artifact_kind,
            r.file_size,
            r.file_name
        );
        if let Some(err) = r.error_text {
            println!("       error: {err}");
        }
    }
    Ok(())
}
