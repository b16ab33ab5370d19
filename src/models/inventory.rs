use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: i32,
    pub sku: String,
    pub ean13: String,
    pub stock: i32,
}

/// Ledger entry for one stock delta. Never updated after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Movement {
    pub id: i32,
    pub item_id: i32,
    pub change: i32,
    pub timestamp: DateTime<Utc>,
}

// i64 so an out-of-range delta reaches validation instead of failing deserialization
#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub change: i64,
}
