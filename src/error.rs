//! Error types for the OCR server

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::extraction::{ExtractionError, InvalidInputError};

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("Missing multipart field: {0}")]
    MissingFile(&'static str),

    #[error("Failed to read upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Lỗi xử lý PDF: {0}")]
    Extraction(#[from] ExtractionError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(e) => e.status(),
            AppError::MissingFile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body, `{"detail": "..."}`
#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Extraction(e) => tracing::error!("Extraction failed: {}", e),
            AppError::InvalidInput(e) => {
                tracing::debug!(file_name = %e.filename, "Rejected non-PDF upload")
            }
            other => tracing::debug!("Bad upload: {}", other),
        }

        let body = Json(ErrorResponse {
            detail: self.to_string(),
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfReadError;

    #[test]
    fn test_invalid_input_is_400_with_localized_message() {
        let err = AppError::from(InvalidInputError {
            filename: "report.docx".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Chỉ hỗ trợ file PDF");
    }

    #[test]
    fn test_extraction_error_carries_cause() {
        let err = AppError::from(ExtractionError::from(PdfReadError::LoadError(
            "no objects found".to_string(),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.to_string(),
            "Lỗi xử lý PDF: Failed to load PDF: no objects found"
        );
    }

    #[test]
    fn test_missing_file_is_422() {
        let err = AppError::MissingFile("file");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
