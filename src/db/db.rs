use super::migrations::{init_with_migrations, needs_migration};
use super::store::StoreError;
use crate::libs::data_storage::DataStorage;
use rusqlite::Connection;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DB_FILE_NAME: &str = "tasks.db";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (or creates) the database file and brings its schema up to date.
    ///
    /// The file is switched to WAL so a running server and a CLI process can
    /// read it concurrently.
    pub fn open(path: &Path) -> Result<Db, StoreError> {
        let mut conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        migrate(&mut conn)?;

        Ok(Db { conn })
    }

    pub fn in_memory() -> Result<Db, StoreError> {
        let mut conn = Connection::open_in_memory()?;
        migrate(&mut conn)?;

        Ok(Db { conn })
    }

    /// `tasks.db` inside the per-user data directory.
    pub fn default_path() -> io::Result<PathBuf> {
        DataStorage::new().get_path(DB_FILE_NAME)
    }
}

/// Brings the schema up to date, skipping the write transaction when it already is.
fn migrate(conn: &mut Connection) -> Result<(), StoreError> {
    let database_error = |e: anyhow::Error| StoreError::Database(e.to_string());
    if needs_migration(conn).map_err(database_error)? {
        init_with_migrations(conn).map_err(database_error)?;
    }
    Ok(())
}
