use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::cv::document::FormatError;
use crate::cv::extractor::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unreadable document: {0}")]
    Document(#[from] FormatError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ExtractError> for AppError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Format(e) => AppError::Document(e),
            ExtractError::Task(e) => {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in text extraction: {e}"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::Document(e @ FormatError::Unsupported(_)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                e.to_string(),
            ),
            AppError::Document(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNREADABLE_DOCUMENT",
                format!("Could not read this file, please fill the form manually. {e}"),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::document::DocumentKind;

    #[test]
    fn test_unsupported_format_maps_to_415() {
        let response =
            AppError::from(FormatError::Unsupported("image/png".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_empty_and_corrupt_documents_map_to_422() {
        let empty = AppError::from(FormatError::Empty {
            kind: DocumentKind::Pdf,
        });
        assert_eq!(empty.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let corrupt = AppError::from(FormatError::Corrupt {
            kind: DocumentKind::Docx,
            reason: "bad zip".to_string(),
        });
        assert_eq!(
            corrupt.into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_failed_extraction_task_maps_to_500() {
        let join_error = tokio::task::spawn_blocking(|| panic!("decoder thread died"))
            .await
            .unwrap_err();
        let response = AppError::from(ExtractError::from(join_error)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_extraction_format_error_keeps_its_status() {
        let err = ExtractError::from(FormatError::Unsupported("image/png".to_string()));
        assert_eq!(
            AppError::from(err).into_response().status(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
    }

    #[test]
    fn test_internal_error_hides_details() {
        let response = AppError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
