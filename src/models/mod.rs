pub mod inventory;

pub use inventory::{AdjustStockRequest, Item, Movement};
