//! Persistence port for small key/value state.
//!
//! The original application kept this kind of state in a process-wide
//! store; here it is an explicit port injected into each consumer, backed
//! by the `kv` table of the history database.

use anyhow::Result;
use sqlx::Row;

use crate::history_db::HistoryDb;

/// Injected key/value persistence seam. Consumers take `&impl StatePort`
/// rather than reaching for a global.
#[allow(async_fn_in_trait)]
pub trait StatePort {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
    /// Remove every stored key.
    async fn clear(&self) -> Result<()>;
}

/// SQLite-backed implementation over the history database's `kv` table.
#[derive(Clone)]
pub struct KvStore {
    db: HistoryDb,
}

impl KvStore {
    pub fn new(db: HistoryDb) -> Self {
        Self { db }
    }
}

impl StatePort for KvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.db.pool)
            .await?;
        Ok(row.map(|r| r.get("value")))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = ?2,
                updated_at = ?3
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(crate::history_db::db::unix_timestamp())
        .execute(&self.db.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv WHERE key = ?1")
            .bind(key)
            .execute(&self.db.pool)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM kv")
            .execute(&self.db.pool)
            .await?;
        Ok(())
    }
}
