// HTTP handlers for review document endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::reviews::{
    error::ReviewError,
    models::{DeleteReport, ReviewUpdateResponse},
};
use crate::AppState;

/// Store a new review document
/// POST /review
#[utoipa::path(
    post,
    path = "/review",
    responses(
        (status = 201, description = "Stored review document with its assigned id"),
        (status = 400, description = "Body is not a JSON object", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "reviews"
)]
pub async fn create_review_handler(
    State(state): State<AppState>,
    Json(document): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ReviewError> {
    let review = state.review_service.create_review(document).await?;
    Ok((StatusCode::CREATED, Json(review.into_document())))
}

/// Fetch a review document by id
/// GET /reviews/:id
#[utoipa::path(
    get,
    path = "/reviews/{id}",
    params(("id" = String, Path, description = "Review document id")),
    responses(
        (status = 200, description = "Review document"),
        (status = 400, description = "Invalid id format", body = String, example = json!({"error": "Invalid ID format"})),
        (status = 404, description = "Review not found", body = String, example = json!({"error": "Review not found"})),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "reviews"
)]
pub async fn get_review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ReviewError> {
    let review = state.review_service.get_review(&id).await?;
    Ok(Json(review.into_document()))
}

/// Merge a field map into a review document
/// PATCH /review/update/:id
#[utoipa::path(
    patch,
    path = "/review/update/{id}",
    params(("id" = String, Path, description = "Review document id")),
    responses(
        (status = 200, description = "Update outcome", body = ReviewUpdateResponse),
        (status = 400, description = "Invalid id or body", body = String),
        (status = 404, description = "Review not found", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "reviews"
)]
pub async fn update_review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(fields): Json<Value>,
) -> Result<Json<ReviewUpdateResponse>, ReviewError> {
    let outcome = state.review_service.update_review(&id, fields).await?;

    let message = if outcome.modified {
        "Review updated successfully"
    } else {
        "No changes made to the review"
    };

    Ok(Json(ReviewUpdateResponse {
        success: true,
        message: message.to_string(),
        result: outcome,
    }))
}

/// Delete a review document
/// DELETE /review/:id
#[utoipa::path(
    delete,
    path = "/review/{id}",
    params(("id" = String, Path, description = "Review document id")),
    responses(
        (status = 200, description = "Delete result", body = DeleteReport),
        (status = 400, description = "Invalid id format", body = String),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "reviews"
)]
pub async fn delete_review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteReport>, ReviewError> {
    let deleted_count = state.review_service.delete_review(&id).await?;
    Ok(Json(DeleteReport { deleted_count }))
}

/// List every review document
/// GET /reviews
#[utoipa::path(
    get,
    path = "/reviews",
    responses(
        (status = 200, description = "All review documents"),
        (status = 500, description = "Internal server error", body = String)
    ),
    tag = "reviews"
)]
pub async fn list_reviews_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Value>>, ReviewError> {
    let reviews = state.review_service.list_reviews().await?;
    Ok(Json(reviews))
}
