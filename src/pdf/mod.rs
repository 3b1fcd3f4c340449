//! PDF reading module
//!
//! Page iteration, text layer access, rasterization and embedded image
//! metadata, with MuPDF as the production backend.

mod mupdf_reader;
mod reader;
mod types;

pub use mupdf_reader::MupdfReader;
pub use reader::{PdfPages, PdfReadError, PdfReader};
pub use types::{EmbeddedImage, PageImage};
