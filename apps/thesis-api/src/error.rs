//! Error types for the Thesis Format API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("File too large. Maximum size is {0}MB")]
    FileTooLarge(usize),

    #[error("Document error: {0}")]
    Document(#[from] shared_docx::DocxError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::DocumentNotFound(id) => {
                (StatusCode::NOT_FOUND, format!("Document not found: {}", id))
            }
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::FileTooLarge(mb) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("File too large. Maximum size is {}MB", mb),
            ),
            ApiError::Document(e) => {
                tracing::error!("Document error: {}", e);
                (StatusCode::UNPROCESSABLE_ENTITY, format!("Document error: {}", e))
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
