use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::utils::error::AppError;
use crate::utils::response::empty_success;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub feedback: Option<String>,
}

/// POST /api/feedback — acknowledge and log; feedback is not persisted.
pub async fn submit_feedback(
    Json(payload): Json<FeedbackRequest>,
) -> Result<Response, AppError> {
    let feedback = payload
        .feedback
        .as_deref()
        .filter(|f| !f.trim().is_empty())
        .ok_or_else(|| AppError::ValidationError("Feedback text is required".to_string()))?;

    tracing::info!(feedback = %feedback, "Feedback received");

    Ok(empty_success("Feedback received successfully").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_feedback_is_acknowledged() {
        let response = submit_feedback(Json(FeedbackRequest {
            feedback: Some("Checkout was smooth".to_string()),
        }))
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_or_blank_feedback_is_rejected() {
        let err = submit_feedback(Json(FeedbackRequest { feedback: None }))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = submit_feedback(Json(FeedbackRequest {
            feedback: Some("   ".to_string()),
        }))
        .await
        .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }
}
