//! `hedra usage` – show usage counters.

use anyhow::Result;
use hedra_core::history_db::HistoryDb;

pub async fn run_usage(db: &HistoryDb) -> Result<()> {
    let counters = db.usage_snapshot().await?;
    if counters.is_empty() {
        println!("No artifacts generated yet.");
        return Ok(());
    }

    println!("{:<14} {}", "ARTIFACT", "GENERATED");
    for c in counters {
        println!("{:<14} {}", c.name, c.count);
    }
    Ok(())
}
