//! Database schema and connection management

use crate::core::cache::cache_base_dir;
use anyhow::Result;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// SQLite-backed comparison log
pub struct ComparisonLog {
    pub(crate) conn: Connection,
}

impl ComparisonLog {
    /// Open the log in the user cache directory and ensure tables exist
    pub fn new() -> Result<Self> {
        Self::open(&Self::database_path())
    }

    /// Open (or create) a log at an explicit path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut log = Self { conn };
        log.initialize_schema()?;
        Ok(log)
    }

    pub fn new_in_memory() -> Result<Self> {
        let mut log = Self {
            conn: Connection::open_in_memory()?,
        };
        log.initialize_schema()?;
        Ok(log)
    }

    /// `~/.cache/fantasy-nexus/nexus.db`
    pub fn database_path() -> PathBuf {
        cache_base_dir().join("nexus.db")
    }

    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        // created_at is unix milliseconds
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS start_sit_comparisons (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                season_year INTEGER NOT NULL,
                week INTEGER NOT NULL,
                profile TEXT NOT NULL,
                player_ids TEXT NOT NULL,
                proj_keys TEXT,
                source_path TEXT,
                dedupe_key TEXT NOT NULL UNIQUE,
                created_by TEXT,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_comparisons_season_week
             ON start_sit_comparisons(season_year, week)",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_comparisons_created_at
             ON start_sit_comparisons(created_at)",
            [],
        )?;

        Ok(())
    }
}
