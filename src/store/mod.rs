//! Item store - persistence abstraction over inventory items
//!
//! Handlers only see `ItemStore`; the concrete engine is picked at startup:
//! - `memory` - `InMemoryItemStore`, a map behind a lock
//! - `postgres` - `crate::db::PgItemStore`, an `sqlx` pool over the `items` table

mod memory;

pub use memory::InMemoryItemStore;

use crate::item::model::Item;
use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Inserts the item or replaces the record with the same code.
    async fn save(&self, item: &Item) -> Result<Item, StoreError>;

    /// Inserts the item only if its code is free. `None` when the code is taken.
    async fn insert(&self, item: &Item) -> Result<Option<Item>, StoreError>;

    /// Replaces the record with the same code only if it exists. `None` when it does not.
    async fn update(&self, item: &Item) -> Result<Option<Item>, StoreError>;

    /// Removes every record and returns how many were removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    /// All items, ordered by code.
    async fn find_all(&self) -> Result<Vec<Item>, StoreError>;

    async fn find_by_id(&self, icode: i32) -> Result<Option<Item>, StoreError>;

    /// Exact title match. When several items share the title, the lowest code wins.
    async fn find_by_title(&self, title: &str) -> Result<Option<Item>, StoreError>;

    async fn find_by_package_date(&self, date: NaiveDate) -> Result<Vec<Item>, StoreError>;

    /// Items with `low <= price <= high`. An inverted range matches nothing.
    async fn find_by_price_between(&self, low: i64, high: i64) -> Result<Vec<Item>, StoreError>;

    async fn exists_by_id(&self, icode: i32) -> Result<bool, StoreError>;

    /// Returns whether a record was removed.
    async fn delete_by_id(&self, icode: i32) -> Result<bool, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}
