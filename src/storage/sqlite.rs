//! SQLite-backed presentation store.
//!
//! One row per presentation in the `presentations` table; the definition is
//! stored as its JSON serialization. Database access goes through an `r2d2`
//! pool so the store can be shared between threads.

use crate::presentation::Presentation;
use crate::storage::PresentationStore;
use anyhow::{Context, Result};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::rusqlite::{params, OpenFlags, OptionalExtension};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

pub struct SqlitePresentationStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqlitePresentationStore {
    /// Opens (or creates) a database at `path` and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path.as_ref())
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE | OpenFlags::SQLITE_OPEN_URI)
            .with_init(|c| {
                c.busy_timeout(std::time::Duration::from_millis(500))?;
                c.pragma_update(None, "journal_mode", "WAL")?;
                Ok(())
            });

        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(std::time::Duration::from_secs(5))
            .build(manager)?;

        Self::with_pool(pool)
    }

    /// In-memory database, private to this store.
    pub fn in_memory() -> Result<Self> {
        // a single connection, every new one would open a separate empty database
        let pool = Pool::builder().max_size(1).build(SqliteConnectionManager::memory())?;
        Self::with_pool(pool)
    }

    fn with_pool(pool: Pool<SqliteConnectionManager>) -> Result<Self> {
        pool.get()?.execute_batch(
            "CREATE TABLE IF NOT EXISTS presentations (
                name TEXT PRIMARY KEY NOT NULL,
                definition TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
            );",
        )?;
        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

impl PresentationStore for SqlitePresentationStore {
    fn load(&self, name: &str) -> Result<Option<Presentation>> {
        let conn = self.conn()?;
        let definition: Option<String> = conn
            .query_row(
                "SELECT definition FROM presentations WHERE name=?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        definition
            .map(|json| serde_json::from_str(&json).with_context(|| format!("decoding presentation '{name}'")))
            .transpose()
    }

    fn save(&self, presentation: &Presentation) -> Result<()> {
        let definition = serde_json::to_string(presentation)?;
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO presentations(name, definition) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE
             SET definition=excluded.definition, updated_at=strftime('%s','now')",
            params![presentation.name, definition],
        )?;
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM presentations WHERE name=?1", params![name])?;
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT name FROM presentations ORDER BY name")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let names = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}
