use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result as AnyResult};
use log::{debug, info};
use rusqlite::Connection;

mod export;
pub mod helpers;
mod migrations;
pub mod models;
pub mod repositories;

use crate::error::{Error, Result};
use migrations::run_migrations;

/// Handle to the label history database.
///
/// Holds only the file location: every operation opens its own connection and
/// closes it before returning, so no transaction outlives a single call.
#[derive(Debug, Clone)]
pub struct Database {
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| {
                        format!("failed to create database directory {}", parent.display())
                    })
                    .map_err(Error::Storage)?;
            }
        }

        let database = Self {
            db_path: Arc::new(db_path),
        };
        database.initialize()?;

        info!("Database initialized at {}", database.path().display());

        Ok(database)
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    /// Creates the history and logo tables if they are missing. Safe to call
    /// any number of times.
    pub fn initialize(&self) -> Result<()> {
        self.execute(|conn| run_migrations(conn).context("failed to run database migrations"))
    }

    fn open(&self) -> AnyResult<Connection> {
        let conn = Connection::open(self.path())
            .with_context(|| format!("failed to open SQLite database {}", self.path().display()))?;
        conn.busy_timeout(Duration::from_secs(5))
            .context("failed to set busy timeout")?;
        Ok(conn)
    }

    pub fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> AnyResult<T>,
    {
        let mut conn = self.open().map_err(Error::Storage)?;
        let result = task(&mut conn).map_err(Error::Storage);

        if let Err((_, err)) = conn.close() {
            debug!("Closing SQLite connection failed: {err}");
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("rotulos.sqlite3");
        let db = Database::new(path.clone()).unwrap();
        assert_eq!(db.path(), path.as_path());
        assert!(path.exists());
    }

    #[test]
    fn directory_in_place_of_the_file_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let result = Database::new(dir.path().to_path_buf());
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn file_that_is_not_sqlite_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rotulos.sqlite3");
        std::fs::write(&path, vec![0xAB; 4096]).unwrap();
        let result = Database::new(path);
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn parent_that_is_a_file_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("history");
        std::fs::write(&blocker, b"x").unwrap();
        let result = Database::new(blocker.join("rotulos.sqlite3"));
        assert!(matches!(result, Err(Error::Storage(_))));
    }
}
