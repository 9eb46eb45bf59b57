use crate::api::models::*;
use crate::sentiment::Sentiment;
use crate::storage::Review;
use axum::{
    Json,
    extract::{Query, State},
};
use tracing::info;

pub async fn create_review_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateReviewRequest>,
) -> Result<Json<Review>, AppError> {
    // Validate
    request.validate().map_err(AppError::BadRequest)?;

    let review = state
        .store
        .create(&request.text)
        .map_err(|e| AppError::Internal(format!("Create review failed: {}", e)))?;

    info!(id = review.id, sentiment = %review.sentiment, "Review created");

    Ok(Json(review))
}

pub async fn list_reviews_handler(
    State(state): State<AppState>,
    Query(query): Query<ListReviewsQuery>,
) -> Result<Json<Vec<Review>>, AppError> {
    // Validate the filter before touching the store
    let filter = match query.sentiment.as_deref() {
        Some(raw) => Some(raw.parse::<Sentiment>().map_err(AppError::BadRequest)?),
        None => None,
    };

    let reviews = state
        .store
        .list(filter)
        .map_err(|e| AppError::Internal(format!("List reviews failed: {}", e)))?;

    info!(
        count = reviews.len(),
        filter = filter.map(|s| s.as_str()).unwrap_or("none"),
        "Reviews listed"
    );

    Ok(Json(reviews))
}
