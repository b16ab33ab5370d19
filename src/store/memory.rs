use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use super::InventoryStore;
use crate::{
    error::{InventoryError, InventoryResult},
    models::{Item, Movement},
    services::stock::plan_adjustment,
};

#[derive(Default)]
struct Tables {
    items: Vec<Item>,
    movements: Vec<Movement>,
    next_item_id: i32,
    next_movement_id: i32,
}

/// In-process store. One mutex guards both tables, so every call is its own
/// transaction.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provisions an item directly, the way the database would be seeded.
    pub fn insert_item(&self, sku: &str, ean13: &str, stock: i32) -> Item {
        let mut tables = self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        tables.next_item_id += 1;
        let item = Item {
            id: tables.next_item_id,
            sku: sku.to_string(),
            ean13: ean13.to_string(),
            stock,
        };
        tables.items.push(item.clone());
        item
    }

    /// Makes every following write fail with a store error until reset.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> InventoryResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| InventoryError::Store("memory store lock poisoned".to_string()))
    }

    fn check_writable(&self) -> InventoryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(InventoryError::Store("simulated write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn list_items(&self) -> InventoryResult<Vec<Item>> {
        let mut items = self.lock()?.items.clone();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn list_movements(&self) -> InventoryResult<Vec<Movement>> {
        let mut movements = self.lock()?.movements.clone();
        movements.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(movements)
    }

    async fn adjust_stock(&self, item_id: i32, change: i32) -> InventoryResult<Item> {
        let mut tables = self.lock()?;

        let index = tables
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(InventoryError::NotFound { item_id })?;

        let Some(new_stock) = plan_adjustment(&tables.items[index], change)? else {
            return Ok(tables.items[index].clone());
        };

        self.check_writable()?;

        tables.next_movement_id += 1;
        let movement = Movement {
            id: tables.next_movement_id,
            item_id,
            change,
            timestamp: Utc::now(),
        };
        tables.movements.push(movement);
        tables.items[index].stock = new_stock;

        Ok(tables.items[index].clone())
    }

    async fn clear_movements(&self) -> InventoryResult<u64> {
        let mut tables = self.lock()?;
        self.check_writable()?;

        let deleted = tables.movements.len() as u64;
        tables.movements.clear();
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn items_are_listed_by_ascending_id() {
        let store = MemoryStore::new();
        let first = store.insert_item("A1", "000", 1);
        let second = store.insert_item("B2", "111", 2);

        let ids: Vec<i32> = store.list_items().await.unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn stock_equals_baseline_plus_movements() {
        let store = MemoryStore::new();
        let item = store.insert_item("A1", "000", 10);

        // -12 lands exactly on zero; -20 would go below it.
        let steps = [(5, Some(15)), (-3, Some(12)), (0, Some(12)), (-12, Some(0)), (8, Some(8)), (-20, None)];
        for (change, expected) in steps {
            match (store.adjust_stock(item.id, change).await, expected) {
                (Ok(updated), Some(stock)) => assert_eq!(updated.stock, stock, "after {change}"),
                (Err(InventoryError::InvalidAdjustment { stock: 8, change: -20 }), None) => {}
                (outcome, _) => panic!("unexpected outcome for {change}: {outcome:?}"),
            }
        }
        assert_eq!(store.list_movements().await.unwrap().len(), 4);

        let movement_sum: i32 = store.list_movements().await.unwrap().iter().map(|m| m.change).sum();
        let stock = store.list_items().await.unwrap()[0].stock;
        assert_eq!(stock, 10 + movement_sum);
        assert_eq!(stock, 8);
    }

    #[tokio::test]
    async fn failed_write_leaves_item_and_ledger_untouched() {
        let store = MemoryStore::new();
        let item = store.insert_item("A1", "000", 10);
        store.set_fail_writes(true);

        let err = store.adjust_stock(item.id, 2).await.unwrap_err();
        assert!(matches!(err, InventoryError::Store(_)));
        assert_eq!(store.list_items().await.unwrap()[0].stock, 10);
        assert!(store.list_movements().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clear_reports_count_and_keeps_stock() {
        let store = MemoryStore::new();
        let item = store.insert_item("A1", "000", 10);
        store.adjust_stock(item.id, 4).await.unwrap();
        store.adjust_stock(item.id, -1).await.unwrap();

        assert_eq!(store.clear_movements().await.unwrap(), 2);
        assert!(store.list_movements().await.unwrap().is_empty());
        assert_eq!(store.list_items().await.unwrap()[0].stock, 13);
        assert_eq!(store.clear_movements().await.unwrap(), 0);
    }
}
