//! Extraction error type

use thiserror::Error;

use crate::ocr::OcrError;
use crate::pdf::PdfReadError;

/// Any failure while handling an accepted upload
///
/// The message carries the underlying cause; no partial result is kept.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Scratch file error: {0}")]
    Scratch(#[source] std::io::Error),

    #[error(transparent)]
    Reader(#[from] PdfReadError),

    #[error(transparent)]
    Ocr(#[from] OcrError),

    #[error("{0}")]
    Task(String),
}
