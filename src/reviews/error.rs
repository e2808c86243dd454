use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors for the review document routes
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Review not found")]
    NotFound,

    #[error("Invalid ID format")]
    InvalidId,

    #[error("Review document must be a JSON object")]
    InvalidDocument,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ReviewError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ReviewError::InvalidId => (StatusCode::BAD_REQUEST, self.to_string()),
            ReviewError::InvalidDocument => (StatusCode::BAD_REQUEST, self.to_string()),
            ReviewError::Database(e) => {
                tracing::error!("Database error in reviews: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
