use std::path::PathBuf;

use anyhow::Context;
use gurobi_item_store::{ItemStore, SqliteItemStore};

fn open_store(db: Option<PathBuf>) -> anyhow::Result<SqliteItemStore> {
    let path = db.unwrap_or_else(SqliteItemStore::default_path);
    SqliteItemStore::open(&path).with_context(|| format!("opening item store {}", path.display()))
}

/// Print the most expensive item of `group` as JSON (`null` if none).
pub async fn top(group: &str, db: Option<PathBuf>) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let item = store.most_expensive_in_group(group).await?;
    println!("{}", serde_json::to_string_pretty(&item)?);
    Ok(())
}

/// Set an item's price, inserting it if missing.
pub async fn upsert(id: &str, price: f64, db: Option<PathBuf>) -> anyhow::Result<()> {
    let store = open_store(db)?;
    let result = store.upsert_price(id, price).await?;
    println!("matched: {}", result.matched);
    println!("modified: {}", result.modified);
    if let Some(upserted) = result.upserted_id {
        println!("upserted: {}", upserted);
    }
    Ok(())
}
