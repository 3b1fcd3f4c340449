//! PDF extraction endpoints
//!
//! - POST /extract - text, native layer first, OCR fallback
//! - POST /extract-images - embedded image placement metadata
//!
//! Both take a multipart body with the PDF in the `file` field.

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::extraction::{
    is_pdf_filename, ExtractionResult, ImageExtraction, InvalidInputError, UploadedDocument,
};
use crate::state::AppState;

/// Multipart field carrying the upload
pub const FILE_FIELD: &str = "file";

/// POST /extract
pub async fn extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractionResult>> {
    let upload = read_pdf_upload(&mut multipart).await?;

    let result = state.extractor().extract_text_async(upload).await?;

    Ok(Json(result))
}

/// POST /extract-images
pub async fn extract_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImageExtraction>> {
    let upload = read_pdf_upload(&mut multipart).await?;

    let result = state.extractor().extract_images_async(upload).await?;

    Ok(Json(result))
}

/// Pull the `file` field out of the body, rejecting non-PDF names before
/// the bytes are read
async fn read_pdf_upload(multipart: &mut Multipart) -> Result<UploadedDocument> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !is_pdf_filename(&filename) {
            return Err(InvalidInputError { filename }.into());
        }

        let data = field.bytes().await?;
        tracing::debug!(file_name = %filename, size = data.len(), "Received upload");

        return Ok(UploadedDocument::new(filename, data)?);
    }

    Err(AppError::MissingFile(FILE_FIELD))
}
