use crate::api::models::AppState;
use crate::api::reviews::handlers::{create_review_handler, list_reviews_handler};
use axum::{
    Router,
    routing::{get, post},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", post(create_review_handler).get(list_reviews_handler))
}
