//! SQLite implementation of the RegistryStore trait.
//!
//! The durable backend for the registry. Uses rusqlite with bundled SQLite,
//! wrapped in async via `tokio::task::spawn_blocking`.
//!
//! Write-once is enforced twice: the compare-and-set insert relies on the
//! `product_id` primary key, and schema triggers abort any UPDATE or DELETE.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use luxid_core::{Commitment, ProductId, RegistryEntry};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{PutResult, RegistryStore};

/// How long a connection waits on a lock held by another connection before
/// reporting `Unavailable`.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if needed. File databases use
    /// WAL journaling so readers do not block the writer.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!(path = %path.display(), journal_mode = %mode, "opened registry database");

        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run a blocking operation on the connection off the async runtime.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| StoreError::Unavailable(format!("mutex poisoned: {}", e)))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("spawn_blocking failed: {}", e)))?
    }
}

fn decode_id(raw: String) -> Result<ProductId> {
    ProductId::try_from(raw.as_str())
        .map_err(|e| StoreError::Corrupt(format!("product id {:?}: {}", raw, e)))
}

fn decode_commitment(raw: &[u8]) -> Result<Commitment> {
    Commitment::try_from(raw).map_err(|e| StoreError::Corrupt(e.to_string()))
}

#[async_trait]
impl RegistryStore for SqliteStore {
    async fn put_if_absent(&self, entry: &RegistryEntry) -> Result<PutResult> {
        let entry = entry.clone();

        self.with_conn(move |conn| {
            let changed = conn.execute(
                "INSERT INTO registry_entries (product_id, commitment, registered_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(product_id) DO NOTHING",
                params![
                    entry.id.as_str(),
                    entry.commitment.0.as_slice(),
                    entry.registered_at,
                ],
            )?;

            Ok(if changed == 1 {
                PutResult::Created
            } else {
                PutResult::AlreadyExists
            })
        })
        .await
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Commitment>> {
        let id = id.clone();

        self.with_conn(move |conn| {
            let raw: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT commitment FROM registry_entries WHERE product_id = ?1",
                    params![id.as_str()],
                    |row| row.get(0),
                )
                .optional()?;

            raw.map(|bytes| decode_commitment(&bytes)).transpose()
        })
        .await
    }

    async fn get_entry(&self, id: &ProductId) -> Result<Option<RegistryEntry>> {
        let id = id.clone();

        self.with_conn(move |conn| {
            let row: Option<(Vec<u8>, i64)> = conn
                .query_row(
                    "SELECT commitment, registered_at FROM registry_entries
                     WHERE product_id = ?1",
                    params![id.as_str()],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            let Some((commitment, registered_at)) = row else {
                return Ok(None);
            };

            Ok(Some(RegistryEntry::new(
                id,
                decode_commitment(&commitment)?,
                registered_at,
            )))
        })
        .await
    }

    async fn exists(&self, id: &ProductId) -> Result<bool> {
        let id = id.clone();

        self.with_conn(move |conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM registry_entries WHERE product_id = ?1)",
                params![id.as_str()],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await
    }

    async fn count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let n: i64 =
                conn.query_row("SELECT COUNT(*) FROM registry_entries", [], |row| row.get(0))?;
            Ok(n as u64)
        })
        .await
    }

    async fn list_ids(&self) -> Result<Vec<ProductId>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT product_id FROM registry_entries ORDER BY product_id")?;
            let raw = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            raw.into_iter().map(decode_id).collect()
        })
        .await
    }
}
