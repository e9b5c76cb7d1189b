//! Item repository.
//!
//! Two queries over an `items` collection shaped like
//! `{ id, description, group, price }`:
//! the most expensive item of a group, and insert-or-update of an item's
//! price. An index on `(group, price DESC)` serves the sorted read.

pub mod store;
pub mod types;

pub use store::{ItemStore, ItemStoreError, SqliteItemStore};
pub use types::{Item, UpsertResult};
