//! `hedra note` – notes attached to processed lectures.

use anyhow::{bail, Result};
use clap::Subcommand;

use hedra_core::history_db::HistoryDb;
use hedra_core::notes;
use hedra_core::store::KvStore;

#[derive(Debug, Subcommand)]
pub enum NoteAction {
    /// Attach a note to a lecture.
    Add {
        /// Lecture identifier (see `hedra history`).
        lecture: i64,
        /// Note text.
        text: String,
    },
    /// List notes for a lecture.
    List {
        /// Lecture identifier.
        lecture: i64,
    },
    /// Remove all notes for a lecture.
    Clear {
        /// Lecture identifier.
        lecture: i64,
    },
}

pub async fn run_note(db: &HistoryDb, action: NoteAction) -> Result<()> {
    let store = KvStore::new(db.clone());
    match action {
        NoteAction::Add { lecture, text } => {
            if db.get_lecture(lecture).await?.is_none() {
                bail!("no lecture with id {lecture}");
            }
            notes::add_note(&store, lecture, &text).await?;
            println!("Noted on lecture {lecture}.");
        }
        NoteAction::List { lecture } => {
            let all = notes::list_notes(&store, lecture).await?;
            if all.is_empty() {
                println!("No notes for lecture {lecture}.");
            } else {
                for (i, note) in all.iter().enumerate() {
                    println!("{:>3}. {note}", i + 1);
                }
            }
        }
        NoteAction::Clear { lecture } => {
            notes::clear_notes(&store, lecture).await?;
            println!("Cleared notes for lecture {lecture}.");
        }
    }
    Ok(())
}
