//! PDF Types
//!
//! Values handed out by a `PdfReader`.

/// A rasterized page, PNG encoded
#[derive(Debug, Clone)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Placement of an image embedded in a page
///
/// Every field is whatever the reader reports; missing values stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddedImage {
    /// `[x0, top, x1, bottom]` in PDF points, origin at the top-left corner
    pub bbox: Option<[f64; 4]>,
    /// Displayed width in points
    pub width: Option<f64>,
    /// Displayed height in points
    pub height: Option<f64>,
}

impl EmbeddedImage {
    /// Build from a bounding box, deriving the displayed size from it
    pub fn from_bbox(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            bbox: Some([x0, top, x1, bottom]),
            width: Some(x1 - x0),
            height: Some(bottom - top),
        }
    }
}
