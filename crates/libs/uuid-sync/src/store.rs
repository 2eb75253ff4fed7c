use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::SyncError;

pub const DATABASE_FILE: &str = "uuid-mappings.db";

/// Username → authenticated UUID mappings, keyed case-insensitively.
pub struct UuidStore {
    conn: Connection,
}

impl UuidStore {
    pub fn in_memory() -> Result<Self, SyncError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    pub fn open(path: &Path) -> Result<Self, SyncError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens `uuid-mappings.db` inside `data_dir`, creating the directory.
    pub fn open_in(data_dir: &Path) -> Result<Self, SyncError> {
        std::fs::create_dir_all(data_dir)?;
        Self::open(&data_dir.join(DATABASE_FILE))
    }

    pub fn store_mapping(&self, username: &str, uuid: Uuid) -> Result<(), SyncError> {
        self.conn.execute(
            "INSERT INTO uuid_mappings (username, uuid, last_updated) VALUES (?1, ?2, CURRENT_TIMESTAMP)
             ON CONFLICT(username) DO UPDATE SET uuid = excluded.uuid, last_updated = CURRENT_TIMESTAMP",
            params![username.to_lowercase(), uuid.hyphenated().to_string()],
        )?;
        Ok(())
    }

    pub fn get_uuid(&self, username: &str) -> Result<Option<Uuid>, SyncError> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT uuid FROM uuid_mappings WHERE username = ?1",
                params![username.to_lowercase()],
                |row| row.get(0),
            )
            .optional()?;
        stored
            .map(|value| Uuid::parse_str(&value).map_err(|err| SyncError::CorruptMapping(err.to_string())))
            .transpose()
    }

    pub fn count(&self) -> Result<u64, SyncError> {
        let count: i64 =
            self.conn.query_row("SELECT COUNT(*) FROM uuid_mappings", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn init_schema(&self) -> rusqlite::Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS uuid_mappings (
                username TEXT PRIMARY KEY,
                uuid TEXT NOT NULL,
                last_updated TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );",
        )
    }
}
