//! Item store backed by SQLite.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rusqlite::OptionalExtension;

use crate::types::{Item, UpsertResult};

/// Abstract item repository.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Highest-priced item of `group`, ties broken by lowest id.
    /// Items without a price sort last.
    async fn most_expensive_in_group(&self, group: &str) -> Result<Option<Item>, ItemStoreError>;

    /// Set the price of item `id`, inserting `{ id, price }` if it does not exist.
    async fn upsert_price(&self, id: &str, price: f64) -> Result<UpsertResult, ItemStoreError>;

    /// Insert or fully replace an item.
    async fn insert_item(&self, item: &Item) -> Result<(), ItemStoreError>;

    /// Fetch an item by id.
    async fn get_item(&self, id: &str) -> Result<Option<Item>, ItemStoreError>;
}

/// Errors produced by the item store.
#[derive(Debug, thiserror::Error)]
pub enum ItemStoreError {
    #[error("SQLite error: {0}")]
    Sqlite(String),
    #[error("Invalid price: {0}")]
    InvalidPrice(f64),
}

impl From<rusqlite::Error> for ItemStoreError {
    fn from(e: rusqlite::Error) -> Self {
        ItemStoreError::Sqlite(e.to_string())
    }
}

/// SQLite-backed item store.
pub struct SqliteItemStore {
    conn: tokio::sync::Mutex<rusqlite::Connection>,
}

impl SqliteItemStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path) -> Result<Self, ItemStoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ItemStoreError::Sqlite(format!("create dir: {e}")))?;
        }
        let conn = rusqlite::Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Self::init_schema(&conn)?;

        tracing::debug!("Opened item store at {}", path.display());

        Ok(Self {
            conn: tokio::sync::Mutex::new(conn),
        })
    }

    /// Open an in-memory store (useful for tests).
    pub fn open_in_memory() -> Result<Self, ItemStoreError> {
        let conn = rusqlite::Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: tokio::sync::Mutex::new(conn),
        })
    }

    /// Default database path: `$XDG_DATA_HOME/gurobi/items.db`
    pub fn default_path() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("gurobi").join("items.db")
    }

    fn init_schema(conn: &rusqlite::Connection) -> Result<(), ItemStoreError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS items (
                id          TEXT PRIMARY KEY,
                description TEXT,
                item_group  TEXT,
                price       REAL
            );

            CREATE INDEX IF NOT EXISTS idx_items_group_price ON items(item_group, price DESC);",
        )?;
        Ok(())
    }
}

fn row_to_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get(0)?,
        description: row.get(1)?,
        group: row.get(2)?,
        price: row.get(3)?,
    })
}

fn check_price(price: f64) -> Result<(), ItemStoreError> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(ItemStoreError::InvalidPrice(price))
    }
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn most_expensive_in_group(&self, group: &str) -> Result<Option<Item>, ItemStoreError> {
        let conn = self.conn.lock().await;
        let item = conn
            .query_row(
                "SELECT id, description, item_group, price
                 FROM items
                 WHERE item_group = ?1
                 ORDER BY price DESC, id ASC
                 LIMIT 1",
                rusqlite::params![group],
                row_to_item,
            )
            .optional()?;

        tracing::debug!(group, found = item.is_some(), "most expensive item lookup");
        Ok(item)
    }

    async fn upsert_price(&self, id: &str, price: f64) -> Result<UpsertResult, ItemStoreError> {
        check_price(price)?;

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        let existing: Option<Option<f64>> = tx
            .query_row(
                "SELECT price FROM items WHERE id = ?1",
                rusqlite::params![id],
                |row| row.get(0),
            )
            .optional()?;

        let result = match existing {
            Some(old) => {
                let modified = if old == Some(price) {
                    0
                } else {
                    tx.execute(
                        "UPDATE items SET price = ?2 WHERE id = ?1",
                        rusqlite::params![id, price],
                    )? as u64
                };
                UpsertResult {
                    matched: 1,
                    modified,
                    upserted_id: None,
                }
            }
            None => {
                tx.execute(
                    "INSERT INTO items (id, price) VALUES (?1, ?2)",
                    rusqlite::params![id, price],
                )?;
                UpsertResult {
                    matched: 0,
                    modified: 0,
                    upserted_id: Some(id.to_string()),
                }
            }
        };
        tx.commit()?;

        tracing::info!(
            "Filter result {} documents, updated {} documents",
            result.matched,
            result.modified
        );
        Ok(result)
    }

    async fn insert_item(&self, item: &Item) -> Result<(), ItemStoreError> {
        if let Some(price) = item.price {
            check_price(price)?;
        }

        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO items (id, description, item_group, price)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![item.id, item.description, item.group, item.price],
        )?;
        Ok(())
    }

    async fn get_item(&self, id: &str) -> Result<Option<Item>, ItemStoreError> {
        let conn = self.conn.lock().await;
        let item = conn
            .query_row(
                "SELECT id, description, item_group, price FROM items WHERE id = ?1",
                rusqlite::params![id],
                row_to_item,
            )
            .optional()?;
        Ok(item)
    }
}
