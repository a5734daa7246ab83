pub mod todos;

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, ErrorCode};
use thiserror::Error;
use tracing::{debug, info};

const SCHEMA_VERSION: i64 = 1;

pub const IN_MEMORY: &str = ":memory:";

/// Storage-level failures. Both variants are fatal for the request.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A column constraint (NOT NULL, UNIQUE) rejected the write.
    #[error("{0}")]
    Integrity(String),

    #[error(transparent)]
    Sqlite(rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, message) = &err {
            if failure.code == ErrorCode::ConstraintViolation {
                return StoreError::Integrity(message.clone().unwrap_or_else(|| err.to_string()));
            }
        }
        StoreError::Sqlite(err)
    }
}

pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open the database at `path`, or an in-memory one for `:memory:`.
    pub fn open(path: &str) -> Result<Self, StoreError> {
        if path == IN_MEMORY {
            return Self::new_in_memory();
        }
        let conn = Connection::open(path)?;
        let store = Self::from_connection(conn)?;
        info!(path, "opened database");
        Ok(store)
    }

    pub fn new_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.configure_pragmas()?;
        store.initialize_schema()?;
        Ok(store)
    }

    /// Lock the connection for the duration of one request's storage work.
    pub fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn configure_pragmas(&self) -> Result<(), StoreError> {
        self.conn().execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        debug!("database pragmas configured");
        Ok(())
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let conn = self.conn();
        let current: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        if current >= SCHEMA_VERSION {
            debug!(version = current, "schema up to date");
            return Ok(());
        }

        info!(from = current, to = SCHEMA_VERSION, "initializing schema");
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task_name TEXT NOT NULL UNIQUE,
                task_description TEXT,
                is_completed INTEGER NOT NULL DEFAULT 0
            );",
        )?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(())
    }
}
