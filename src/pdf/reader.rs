//! PDF reader abstraction
//!
//! The extraction pipeline only talks to these traits, so tests can swap in
//! scripted documents while production uses MuPDF.

use std::path::Path;

use thiserror::Error;

use super::types::{EmbeddedImage, PageImage};

/// PDF reading errors
#[derive(Error, Debug)]
pub enum PdfReadError {
    #[error("Failed to load PDF: {0}")]
    LoadError(String),
    #[error("Page {0} not found (document has {1} pages)")]
    PageNotFound(usize, usize),
    #[error("Failed to extract text: {0}")]
    TextError(String),
    #[error("Failed to render page: {0}")]
    RenderError(String),
    #[error("Image encoding error: {0}")]
    ImageError(String),
    #[error("MuPDF error: {0}")]
    MuPdfError(String),
}

impl From<mupdf::Error> for PdfReadError {
    fn from(e: mupdf::Error) -> Self {
        PdfReadError::MuPdfError(e.to_string())
    }
}

/// Opens documents from disk
pub trait PdfReader: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfPages>, PdfReadError>;
}

/// An opened document; page indices are 0-based
pub trait PdfPages {
    fn page_count(&self) -> usize;

    /// Embedded text layer of a page, `None` when the page has none
    fn extract_text(&self, page: usize) -> Result<Option<String>, PdfReadError>;

    /// Rasterize a page at the given resolution
    fn render_page(&self, page: usize, dpi: u32) -> Result<PageImage, PdfReadError>;

    /// Embedded raster images in reader order, without pixel data
    fn images(&self, page: usize) -> Result<Vec<EmbeddedImage>, PdfReadError>;
}
