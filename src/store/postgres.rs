use async_trait::async_trait;

use super::InventoryStore;
use crate::{
    database::Database,
    error::{InventoryError, InventoryResult},
    models::{Item, Movement},
    services::stock::plan_adjustment,
};

#[derive(Clone)]
pub struct PgStore {
    pool: Database,
}

impl PgStore {
    pub fn new(pool: Database) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for PgStore {
    async fn list_items(&self) -> InventoryResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>("SELECT id, sku, ean13, stock FROM items ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    async fn list_movements(&self) -> InventoryResult<Vec<Movement>> {
        let movements = sqlx::query_as::<_, Movement>(
            "SELECT id, item_id, change, timestamp FROM movements ORDER BY timestamp DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    async fn adjust_stock(&self, item_id: i32, change: i32) -> InventoryResult<Item> {
        // Dropping `tx` on any early return rolls it back.
        let mut tx = self.pool.begin().await?;

        // Row lock: concurrent adjustments of one item queue up here.
        let item = sqlx::query_as::<_, Item>(
            "SELECT id, sku, ean13, stock FROM items WHERE id = $1 FOR UPDATE",
        )
        .bind(item_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(InventoryError::NotFound { item_id })?;

        let Some(new_stock) = plan_adjustment(&item, change)? else {
            return Ok(item);
        };

        sqlx::query("INSERT INTO movements (item_id, change) VALUES ($1, $2)")
            .bind(item_id)
            .bind(change)
            .execute(&mut *tx)
            .await?;

        let updated = sqlx::query_as::<_, Item>(
            "UPDATE items SET stock = $1 WHERE id = $2 RETURNING id, sku, ean13, stock",
        )
        .bind(new_stock)
        .bind(item_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn clear_movements(&self) -> InventoryResult<u64> {
        let mut tx = self.pool.begin().await?;

        match sqlx::query("DELETE FROM movements").execute(&mut *tx).await {
            Ok(done) => {
                tx.commit().await?;
                Ok(done.rows_affected())
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    log::error!("Rollback after failed history clear also failed: {}", rollback_err);
                }
                Err(err.into())
            }
        }
    }
}
