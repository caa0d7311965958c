use std::{
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

use super::migrations::run_migrations;
use super::StorageBackend;

/// Key -> JSON text table in a SQLite file.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl SqliteBackend {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let mut conn = Connection::open(&db_path).context("failed to open SQLite database")?;

        if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
            error!("Failed to enable WAL mode: {err}");
        }

        run_migrations(&mut conn).context("failed to run database migrations")?;

        info!("Database initialized at {}", db_path.display());

        Ok(Self {
            conn: Mutex::new(conn),
            db_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connection(&self) -> MutexGuard<'_, Connection> {
        match self.conn.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl StorageBackend for SqliteBackend {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        let raw = self
            .connection()
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
            .with_context(|| format!("failed to load '{key}'"))?;

        raw.map(|text| serde_json::from_str(&text).context("stored value is not valid JSON"))
            .transpose()
    }

    fn write(&self, key: &str, value: Value) -> Result<()> {
        let text = serde_json::to_string(&value)?;
        self.connection()
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                params![key, text, Utc::now().to_rfc3339()],
            )
            .with_context(|| format!("failed to save '{key}'"))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path().display().to_string()
    }
}
