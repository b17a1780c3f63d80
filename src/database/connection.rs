/*!
 * Database connection management.
 *
 * A file-backed store is opened afresh for every operation and closed again
 * when the operation returns; no connection outlives a call. The in-memory
 * store used by tests keeps one shared connection instead, since an
 * in-memory SQLite database disappears with its last connection.
 *
 * Blocking SQLite work is moved off the async runtime with `spawn_blocking`.
 */

use anyhow::{Context, Result};
use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::schema;

/// Default database filename, relative to the working directory
pub const DEFAULT_DB_FILENAME: &str = "internship_tracking.db";

/// Where the store lives
#[derive(Clone)]
enum Store {
    /// A file on disk, opened per operation
    File,
    /// A single in-memory connection shared by all operations
    Memory(Arc<Mutex<Connection>>),
}

/// Database handle; cheap to clone
#[derive(Clone)]
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    store: Store,
}

impl DatabaseConnection {
    /// Open (and if needed create) the database at the specified path
    ///
    /// The schema is initialized once here; later operations only open and
    /// close connections.
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create database directory: {:?}", parent)
                })?;
            }
        }

        info!("Opening database at: {:?}", db_path);

        let db = Self {
            db_path,
            store: Store::File,
        };
        db.execute(|conn| schema::initialize_schema(conn))?;

        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory database");

        let conn =
            Connection::open_in_memory().context("Failed to create in-memory database")?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            store: Store::Memory(Arc::new(Mutex::new(conn))),
        })
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection to the database file
    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open database: {:?}", self.db_path))?;
        schema::configure_connection(&conn)?;
        Ok(conn)
    }

    /// Close a per-operation connection, surfacing any close failure
    fn close(conn: Connection) -> Result<()> {
        conn.close()
            .map_err(|(_, e)| e)
            .context("Failed to close database connection")
    }

    /// Execute a database operation with a connection
    ///
    /// For async contexts, use `execute_async`.
    pub fn execute<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        match &self.store {
            Store::File => {
                let conn = self.open()?;
                let result = f(&conn);
                Self::close(conn)?;
                result
            }
            Store::Memory(shared) => {
                let conn = shared
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Failed to acquire database lock: {}", e))?;
                f(&conn)
            }
        }
    }

    /// Begin a transaction and execute operations within it
    ///
    /// The transaction commits only when `f` succeeds; on every other exit
    /// path it is rolled back when dropped.
    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T>,
    {
        fn run<F, T>(conn: &mut Connection, f: F) -> Result<T>
        where
            F: FnOnce(&rusqlite::Transaction) -> Result<T>,
        {
            let tx = conn.transaction()?;
            let result = f(&tx)?;
            tx.commit()?;
            Ok(result)
        }

        match &self.store {
            Store::File => {
                let mut conn = self.open()?;
                let result = run(&mut conn, f);
                Self::close(conn)?;
                result
            }
            Store::Memory(shared) => {
                let mut conn = shared
                    .lock()
                    .map_err(|e| anyhow::anyhow!("Failed to acquire database lock: {}", e))?;
                run(&mut conn, f)
            }
        }
    }

    /// Execute a database operation asynchronously using spawn_blocking
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();

        tokio::task::spawn_blocking(move || db.execute(f))
            .await
            .context("Database task panicked")?
    }

    /// Run a transaction asynchronously using spawn_blocking
    pub async fn transaction_async<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.clone();

        tokio::task::spawn_blocking(move || db.transaction(f))
            .await
            .context("Database transaction task panicked")?
    }
}
