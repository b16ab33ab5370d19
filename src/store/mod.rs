//! Persistence seam between the HTTP handlers and the database.
//!
//! `PgStore` is the production backend. `MemoryStore` keeps the same
//! transactional guarantees in process and backs the test-suite.

mod postgres;

#[cfg(test)]
mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::InventoryResult,
    models::{Item, Movement},
};

pub use postgres::PgStore;

#[cfg(test)]
pub use memory::MemoryStore;

pub type SharedStore = Arc<dyn InventoryStore>;

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All items, ascending by id.
    async fn list_items(&self) -> InventoryResult<Vec<Item>>;

    /// All movements, newest first.
    async fn list_movements(&self) -> InventoryResult<Vec<Movement>>;

    /// Applies `change` to the item's stock and appends the matching movement
    /// in one transaction. A zero change writes nothing and returns the item
    /// as it is.
    async fn adjust_stock(&self, item_id: i32, change: i32) -> InventoryResult<Item>;

    /// Deletes every movement and returns how many were removed. Item stock
    /// is left untouched.
    async fn clear_movements(&self) -> InventoryResult<u64>;
}
