use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
};

use crate::{
    error::{InventoryError, InventoryResult},
    models::{AdjustStockRequest, Item},
    services::stock,
    store::SharedStore,
};

pub async fn items_list(State(store): State<SharedStore>) -> InventoryResult<Json<Vec<Item>>> {
    let items = store.list_items().await?;
    Ok(Json(items))
}

// Body rejections become 422 with a `detail` message instead of axum's plain-text default.
pub async fn adjust_item_stock(
    State(store): State<SharedStore>,
    Path(item_id): Path<i32>,
    payload: Result<Json<AdjustStockRequest>, JsonRejection>,
) -> InventoryResult<Json<Item>> {
    let Json(adjustment) = payload.map_err(|rejection| InventoryError::InvalidInput(rejection.body_text()))?;

    let item = stock::adjust_stock(store.as_ref(), item_id, adjustment.change).await?;
    Ok(Json(item))
}
