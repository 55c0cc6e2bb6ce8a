//! SQLite-backed item store.
//!
//! # Design
//! `ItemStore` holds only the database location. Every operation opens its own
//! connection on tokio's blocking pool, runs its statements, and drops the
//! connection before returning, so no connection outlives a request and none
//! is shared between requests. Statements run in autocommit mode except
//! [`ItemStore::append`], which reads the next order and inserts inside a
//! single immediate transaction.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use thiserror::Error;

use crate::item::{Item, ITEM_COLUMNS};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_ITEMS_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        is_completed INTEGER DEFAULT 0,
        display_order INTEGER,
        created_at TIMESTAMP DEFAULT (DATETIME('now', 'localtime')),
        updated_at TIMESTAMP DEFAULT (DATETIME('now', 'localtime'))
    )";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Clone, Debug)]
pub struct ItemStore {
    path: Arc<PathBuf>,
}

impl ItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the `items` table if it does not exist yet.
    pub async fn initialize(&self) -> Result<(), StoreError> {
        self.run(|conn| conn.execute_batch(CREATE_ITEMS_TABLE)).await
    }

    /// All items, ascending by `display_order`, newest first on ties.
    pub async fn list(&self) -> Result<Vec<Item>, StoreError> {
        self.run(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM items ORDER BY display_order, created_at DESC"
            ))?;
            let items = stmt
                .query_map([], Item::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(items)
        })
        .await
    }

    pub async fn get(&self, id: i64) -> Result<Option<Item>, StoreError> {
        self.run(move |conn| select_item(conn, id)).await
    }

    /// `MAX(display_order) + 1`, or `0` for an empty table.
    pub async fn next_display_order(&self) -> Result<i64, StoreError> {
        self.run(|conn| next_display_order(conn)).await
    }

    /// Insert an item with an explicit order.
    pub async fn create(&self, name: String, display_order: i64) -> Result<Item, StoreError> {
        self.run(move |conn| insert_item(conn, &name, display_order)).await
    }

    /// Insert an item at the end of the list.
    ///
    /// The order is computed and the row inserted under one write lock, so
    /// concurrent appends never share a `display_order`.
    pub async fn append(&self, name: String) -> Result<Item, StoreError> {
        self.run(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let order = next_display_order(&tx)?;
            let item = insert_item(&tx, &name, order)?;
            tx.commit()?;
            Ok(item)
        })
        .await
    }

    /// Rename an item and refresh `updated_at`. `None` if `id` does not exist.
    pub async fn update_name(&self, id: i64, name: String) -> Result<Option<Item>, StoreError> {
        self.run(move |conn| {
            conn.execute(
                "UPDATE items SET name = ?1, updated_at = ?2 WHERE id = ?3",
                params![name, local_timestamp(), id],
            )?;
            select_item(conn, id)
        })
        .await
    }

    /// Flip `is_completed` and refresh `updated_at`. `None` if `id` does not exist.
    pub async fn toggle_completed(&self, id: i64) -> Result<Option<Item>, StoreError> {
        self.run(move |conn| {
            conn.execute(
                "UPDATE items
                 SET is_completed = CASE WHEN is_completed = 0 THEN 1 ELSE 0 END,
                     updated_at = ?1
                 WHERE id = ?2",
                params![local_timestamp(), id],
            )?;
            select_item(conn, id)
        })
        .await
    }

    /// Remove an item. Returns whether a row was deleted; a missing id is not an error.
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        self.run(move |conn| {
            let removed = conn.execute("DELETE FROM items WHERE id = ?1", params![id])?;
            Ok(removed > 0)
        })
        .await
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(self.path.as_path())?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Run `op` against a fresh connection on the blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let store = self.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = store.connect()?;
            op(&mut conn)
        })
        .await?;
        Ok(result?)
    }
}

fn local_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn select_item(conn: &Connection, id: i64) -> rusqlite::Result<Option<Item>> {
    conn.query_row(
        &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
        params![id],
        Item::from_row,
    )
    .optional()
}

fn next_display_order(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COALESCE(MAX(display_order) + 1, 0) FROM items",
        [],
        |row| row.get(0),
    )
}

fn insert_item(conn: &Connection, name: &str, display_order: i64) -> rusqlite::Result<Item> {
    let now = local_timestamp();
    conn.execute(
        "INSERT INTO items (name, display_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
        params![name, display_order, now],
    )?;
    select_item(conn, conn.last_insert_rowid())?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}
