pub mod inventory;
pub mod movements;

use axum::response::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Inventory Management API" }))
}
