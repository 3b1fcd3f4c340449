//! OCR Module
//!
//! Converts rasterized PDF pages into text for documents without a text layer.
//!
//! Backends:
//! - Tesseract executable (default, requires installation)
//! - libtesseract bindings (`ocr-tesseract` feature)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use itongquiz_ocr_server::ocr::{OcrEngine, OcrParams, TesseractCli};
//!
//! let engine = TesseractCli::default();
//! let text = engine.image_to_text(&page_image, &OcrParams::default())?;
//! ```

mod provider;
mod types;

pub use provider::{probe_available, OcrEngine, TesseractCli};
pub use types::{OcrError, OcrParams, PageSegMode, ProbeError};

#[cfg(feature = "ocr-tesseract")]
pub use provider::TesseractLib;
