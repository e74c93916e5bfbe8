use std::fs;
use std::path::{Path, PathBuf};

use formtx_core::kit::types::diagnostics::Diagnostic;
use formtx_core::persistence::{ConfigStore, SavedConfiguration};
use rusqlite::{params, Connection};

/// rusqlite-backed implementation of the persistence collaborator: one row
/// per saved configuration, the form configuration and metadata stored as
/// JSON columns. Single-key atomicity comes from sqlite's per-statement
/// guarantees.
pub struct ConfigDb {
    conn: Connection,
}

impl ConfigDb {
    pub fn open(path: &Path) -> Result<Self, String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("unable to create {}: {}", parent.display(), e))?;
        }
        let conn = Connection::open(path)
            .map_err(|e| format!("unable to open {}: {}", path.display(), e))?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, String> {
        let conn = Connection::open_in_memory().map_err(|e| e.to_string())?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, String> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS configurations (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                form_config TEXT NOT NULL,
                metadata TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| format!("unable to initialize the configuration database: {}", e))?;
        Ok(ConfigDb { conn })
    }
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("formtx")
        .join("configs.sqlite")
}

fn storage_error(err: rusqlite::Error) -> Diagnostic {
    Diagnostic::error(format!("configuration storage: {}", err)).with_code("storage_failure")
}

fn decode_row(
    id: String,
    title: String,
    form_config: String,
    metadata: String,
) -> Result<SavedConfiguration, Diagnostic> {
    Ok(SavedConfiguration {
        id,
        title,
        form_config: serde_json::from_str(&form_config)
            .map_err(|e| Diagnostic::error(format!("stored form configuration corrupted: {}", e)))?,
        metadata: serde_json::from_str(&metadata)
            .map_err(|e| Diagnostic::error(format!("stored metadata corrupted: {}", e)))?,
    })
}

impl ConfigStore for ConfigDb {
    fn get(&self, id: &str) -> Result<Option<SavedConfiguration>, Diagnostic> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, form_config, metadata FROM configurations WHERE id = ?1")
            .map_err(storage_error)?;
        let mut rows = stmt
            .query_map(params![id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(storage_error)?;
        match rows.next() {
            Some(row) => {
                let (id, title, form_config, metadata) = row.map_err(storage_error)?;
                decode_row(id, title, form_config, metadata).map(Some)
            }
            None => Ok(None),
        }
    }

    fn put(&self, config: &SavedConfiguration) -> Result<(), Diagnostic> {
        let form_config = serde_json::to_string(&config.form_config)
            .map_err(|e| Diagnostic::error(format!("form configuration serialization: {}", e)))?;
        let metadata = serde_json::to_string(&config.metadata)
            .map_err(|e| Diagnostic::error(format!("metadata serialization: {}", e)))?;
        self.conn
            .execute(
                "INSERT INTO configurations (id, title, form_config, metadata)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    form_config = excluded.form_config,
                    metadata = excluded.metadata",
                params![config.id, config.title, form_config, metadata],
            )
            .map_err(storage_error)?;
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<(), Diagnostic> {
        self.conn
            .execute("DELETE FROM configurations WHERE id = ?1", params![id])
            .map_err(storage_error)?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<SavedConfiguration>, Diagnostic> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, form_config, metadata FROM configurations ORDER BY title")
            .map_err(storage_error)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)))
            .map_err(storage_error)?;
        let mut configurations = Vec::new();
        for row in rows {
            let (id, title, form_config, metadata) = row.map_err(storage_error)?;
            configurations.push(decode_row(id, title, form_config, metadata)?);
        }
        Ok(configurations)
    }
}
