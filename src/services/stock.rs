//! Stock adjustment: the only write path that touches `items.stock`.
//!
//! Input is validated here, then handed to the store, which runs
//! [`plan_adjustment`] inside its own transaction so the check and both writes
//! (movement insert, stock update) happen atomically.

use crate::{
    error::{InventoryError, InventoryResult},
    models::Item,
    store::InventoryStore,
};

/// Narrows a requested delta to the width of the `stock` column.
pub fn validate_change(change: i64) -> InventoryResult<i32> {
    i32::try_from(change).map_err(|_| {
        InventoryError::InvalidInput(format!(
            "change must be between {} and {}",
            i32::MIN,
            i32::MAX
        ))
    })
}

/// Decides what an adjustment does to `item`.
///
/// `Ok(None)` means a zero delta: nothing is written. `Ok(Some(stock))` is the
/// new stock level. A result below zero, or one that overflows, is rejected.
pub fn plan_adjustment(item: &Item, change: i32) -> InventoryResult<Option<i32>> {
    let rejected = || InventoryError::InvalidAdjustment {
        stock: item.stock,
        change: i64::from(change),
    };

    let new_stock = item.stock.checked_add(change).ok_or_else(rejected)?;
    if new_stock < 0 {
        return Err(rejected());
    }

    if change == 0 {
        Ok(None)
    } else {
        Ok(Some(new_stock))
    }
}

pub async fn adjust_stock(store: &dyn InventoryStore, item_id: i32, change: i64) -> InventoryResult<Item> {
    let change = validate_change(change)?;

    match store.adjust_stock(item_id, change).await {
        Ok(item) => {
            if change != 0 {
                log::info!("Adjusted item {} ({}) by {}, stock now {}", item.id, item.sku, change, item.stock);
            }
            Ok(item)
        }
        Err(err) => {
            match &err {
                InventoryError::Store(message) => {
                    log::error!("Failed to adjust item {}: {}", item_id, message)
                }
                InventoryError::InvalidAdjustment { stock, change } => {
                    log::warn!("Rejected adjustment of item {} by {}: stock is {}", item_id, change, stock)
                }
                InventoryError::NotFound { item_id } => log::warn!("Adjustment for unknown item {}", item_id),
                InventoryError::InvalidInput(reason) => log::warn!("Invalid adjustment of item {}: {}", item_id, reason),
            }
            Err(err)
        }
    }
}
