//! Per-lecture notes, stored through the persistence port as JSON lists.

use anyhow::{Context, Result};

use crate::history_db::LectureId;
use crate::store::StatePort;

fn key(lecture: LectureId) -> String {
    format!("notes/{lecture}")
}

/// Append a note to a lecture's list.
pub async fn add_note<S: StatePort>(store: &S, lecture: LectureId, text: &str) -> Result<()> {
    let mut notes = list_notes(store, lecture).await?;
    notes.push(text.to_string());
    let encoded = serde_json::to_string(&notes).context("encode notes")?;
    store.set(&key(lecture), &encoded).await
}

/// All notes for a lecture, oldest first.
pub async fn list_notes<S: StatePort>(store: &S, lecture: LectureId) -> Result<Vec<String>> {
    match store.get(&key(lecture)).await? {
        Some(raw) => serde_json::from_str(&raw).context("decode notes"),
        None => Ok(Vec::new()),
    }
}

/// Drop all notes for a lecture.
pub async fn clear_notes<S: StatePort>(store: &S, lecture: LectureId) -> Result<()> {
    store.remove(&key(lecture)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history_db::db::open_memory;
    use crate::store::KvStore;

    #[tokio::test]
    async fn notes_append_in_order_and_clear() {
        let store = KvStore::new(open_memory().await.unwrap());
        assert!(list_notes(&store, 1).await.unwrap().is_empty());

        add_note(&store, 1, "revisit slide 12").await.unwrap();
        add_note(&store, 1, "ask about the second proof").await.unwrap();
        assert_eq!(
            list_notes(&store, 1).await.unwrap(),
            vec![
                "revisit slide 12".to_string(),
                "ask about the second proof".to_string()
            ]
        );

        clear_notes(&store, 1).await.unwrap();
        assert!(list_notes(&store, 1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn notes_are_scoped_per_lecture() {
        let store = KvStore::new(open_memory().await.unwrap());
        add_note(&store, 1, "first").await.unwrap();
        add_note(&store, 2, "second").await.unwrap();
        assert_eq!(list_notes(&store, 1).await.unwrap(), vec!["first".to_string()]);
        assert_eq!(list_notes(&store, 2).await.unwrap(), vec!["second".to_string()]);
    }
}
