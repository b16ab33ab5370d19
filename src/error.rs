use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Item not found")]
    NotFound { item_id: i32 },
    #[error("Stock cannot be negative")]
    InvalidAdjustment { stock: i32, change: i64 },
    #[error("{0}")]
    InvalidInput(String),
    #[error("An error occurred: {0}")]
    Store(String),
}

impl InventoryError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidAdjustment { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for InventoryError {
    fn from(err: sqlx::Error) -> Self {
        Self::Store(err.to_string())
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;
