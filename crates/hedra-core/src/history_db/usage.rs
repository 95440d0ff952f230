//! Usage counters: one row per artifact kind, bumped on success.

use anyhow::Result;
use sqlx::Row;

use super::db::{unix_timestamp, HistoryDb};
use super::types::UsageCounter;

impl HistoryDb {
    /// Increment a named counter, creating it at 1 if absent.
    pub async fn bump_usage(&self, name: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO usage_counters (name, count, updated_at)
            VALUES (?1, 1, ?2)
            ON CONFLICT(name) DO UPDATE SET
                count = count + 1,
                updated_at = ?2
            "#,
        )
        .bind(name)
        .bind(unix_timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Snapshot of all counters, sorted by name.
    pub async fn usage_snapshot(&self) -> Result<Vec<UsageCounter>> {
        let rows = sqlx::query(
            r#"
            SELECT name, count, updated_at
            FROM usage_counters
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| UsageCounter {
                name: row.get("name"),
                count: row.get("count"),
                updated_at: row.get("updated_at"),
            })
            .collect())
    }
}
