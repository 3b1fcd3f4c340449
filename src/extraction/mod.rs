//! PDF extraction pipeline
//!
//! ```text
//! upload bytes ─▶ ScratchFile ─▶ PdfReader::open
//!                                    │
//!                     native text of every page
//!                                    │
//!                     blank? ──no──▶ method = native
//!                       │
//!                      yes ─▶ render each page ─▶ OcrEngine ─▶ method = ocr
//! ```
//!
//! The scratch file is deleted on every exit path.

mod error;
mod extractor;
mod scratch;
mod types;

pub use error::ExtractionError;
pub use extractor::{Extractor, ExtractorSettings};
pub use scratch::ScratchFile;
pub use types::{
    is_pdf_filename, join_page_texts, ExtractionMethod, ExtractionResult, ImageDescriptor,
    ImageExtraction, InvalidInputError, UploadedDocument, PDF_ONLY_MESSAGE,
};
