use crate::storage::ReviewStore;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReviewStore>,
}

/// Request to create a new review
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub text: String,
}

/// Query parameters for listing reviews
#[derive(Debug, Default, Deserialize)]
pub struct ListReviewsQuery {
    pub sentiment: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub total_reviews: usize,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl CreateReviewRequest {
    /// Validate the request
    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("Review text cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ErrorResponse {
            error: status.to_string(),
            message,
        }))
        .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_fails_validation() {
        let request = CreateReviewRequest {
            text: "   ".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn non_empty_text_passes_validation() {
        let request = CreateReviewRequest {
            text: "Это было хорошо".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn bad_request_maps_to_400() {
        let response = AppError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_maps_to_500() {
        let response = AppError::Internal("disk on fire".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
