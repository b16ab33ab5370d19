use axum::{extract::State, http::StatusCode, response::Json};

use crate::{error::InventoryResult, models::Movement, store::SharedStore};

pub async fn movements_list(State(store): State<SharedStore>) -> InventoryResult<Json<Vec<Movement>>> {
    let movements = store.list_movements().await?;
    Ok(Json(movements))
}

pub async fn clear_movements(State(store): State<SharedStore>) -> InventoryResult<StatusCode> {
    let deleted = store.clear_movements().await.map_err(|err| {
        log::error!("Failed to clear movement history: {}", err);
        err
    })?;

    log::info!("Successfully deleted {} movements", deleted);
    Ok(StatusCode::NO_CONTENT)
}
