//! Persistent processing history (SQLite via sqlx).
//!
//! Stores one row per processed lecture (name, size, checksum, artifact
//! kind, status) plus usage counters and the `kv` table behind the
//! persistence port in [`crate::store`].

pub mod db;
pub mod types;

mod lectures;
mod usage;

pub use db::*;
pub use types::*;
