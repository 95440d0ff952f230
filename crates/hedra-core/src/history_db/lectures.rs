//! Lecture row operations: add, status updates, list, get, remove.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, HistoryDb};
use super::types::{LectureId, LectureRecord, LectureStatus, NewLecture};

impl HistoryDb {
    /// Insert a new lecture row in `processing` state and return its id.
    pub async fn add_lecture(&self, lecture: &NewLecture<'_>) -> Result<LectureId> {
        let now = unix_timestamp();
        let id = sqlx::query(
            r#"
            INSERT INTO lectures (
                file_name, file_size, sha256, mime_type, artifact_kind,
                status, error_text, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7, ?8)
            "#,
        )
        .bind(lecture.file_name)
        .bind(lecture.file_size)
        .bind(lecture.sha256)
        .bind(lecture.mime_type)
        .bind(lecture.artifact_kind)
        .bind(LectureStatus::Processing.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    /// Mark a lecture as completed, clearing any previous error text.
    pub async fn mark_completed(&self, id: LectureId) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE lectures
            SET status = ?1, error_text = NULL, updated_at = ?2
            WHERE id = ?3
            "#,
        )
        .bind(LectureStatus::Completed.as_str())
        .bind(unix_timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Mark a lecture as failed with a short error description.
    pub async fn mark_failed(&self, id: LectureId, error: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE lectures
            SET status = ?1, error_text = ?2, updated_at = ?3
            WHERE id = ?4
            "#,
        )
        .bind(LectureStatus::Failed.as_str())
        .bind(error)
        .bind(unix_timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// List all lectures, newest first.
    pub async fn list_lectures(&self) -> Result<Vec<LectureRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, file_name, file_size, sha256, mime_type, artifact_kind,
                   status, error_text, created_at, updated_at
            FROM lectures
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(record_from_row).collect())
    }

    /// Fetch a single lecture by id.
    pub async fn get_lecture(&self, id: LectureId) -> Result<Option<LectureRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, file_name, file_size, sha256, mime_type, artifact_kind,
                   status, error_text, created_at, updated_at
            FROM lectures
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(record_from_row))
    }

    /// Delete a lecture row. Returns true if a row was removed.
    pub async fn remove_lecture(&self, id: LectureId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM lectures WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn record_from_row(row: &sqlx::sqlite::SqliteRow) -> LectureRecord {
    let status_str: String = row.get("status");
    LectureRecord {
        id: row.get("id"),
        file_name: row.get("file_name"),
        file_size: row.get("file_size"),
        sha256: row.get("sha256"),
        mime_type: row.get("mime_type"),
        artifact_kind: row.get("artifact_kind"),
        status: LectureStatus::from_str(&status_str),
        error_text: row.get("error_text"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
