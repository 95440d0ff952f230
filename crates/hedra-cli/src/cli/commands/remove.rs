//! `hedra remove <id>` – delete a lecture and its notes from the history.

use anyhow::{bail, Result};
use hedra_core::history_db::HistoryDb;
use hedra_core::notes;
use hedra_core::store::KvStore;

pub async fn run_remove(db: &HistoryDb, id: i64) -> Result<()> {
    let removed = db.remove_lecture(id).await?;
    if !removed {
        bail!("no lecture with id {id}");
    }
    notes::clear_notes(&KvStore::new(db.clone()), id).await?;
    println!("Removed lecture {id}.");
    Ok(())
}
