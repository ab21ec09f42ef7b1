//! Database connection management

use super::migrations::{applied_migrations, run_migrations};
use crate::config::DatabaseLocation;
use crate::credentials::DEFAULT_COST;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Connection to the auction database with the schema applied.
pub struct AuctionDatabase {
    pub(crate) conn: Connection,
    pub(crate) hash_cost: u32,
}

impl AuctionDatabase {
    /// Open the configured database and bring its schema up to date.
    pub fn open(location: &DatabaseLocation) -> Result<Self> {
        match location {
            DatabaseLocation::Memory => Self::open_in_memory(),
            DatabaseLocation::File(path) => Self::open_path(path),
        }
    }

    /// Open (creating if needed) a database file.
    pub fn open_path(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening SQLite database {}", path.display()))?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let mut db = Self {
            conn,
            hash_cost: DEFAULT_COST,
        };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Use a different bcrypt cost for passwords hashed through this handle.
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Apply any pending migrations, returning their names.
    pub fn initialize_schema(&mut self) -> Result<Vec<String>> {
        run_migrations(&mut self.conn)
    }

    /// Names of the migrations applied to this database.
    pub fn applied_migrations(&self) -> Result<Vec<String>> {
        applied_migrations(&self.conn)
    }

    /// Run `f` inside a single SQLite transaction, committing on success.
    pub(crate) fn in_transaction<T>(
        &mut self,
        f: impl FnOnce(&rusqlite::Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let tx = self.conn.transaction()?;
        let value = f(&tx)?;
        tx.commit()?;
        Ok(value)
    }
}
