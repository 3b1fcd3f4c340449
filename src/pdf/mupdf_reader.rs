//! PDF reading using MuPDF
//!
//! MuPDF's `fz_context` is not thread-safe, so an opened document never
//! leaves the thread that opened it. The extraction pipeline runs the whole
//! request on one blocking task.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, RgbImage};
use mupdf::text_page::TextBlockType;
use mupdf::{Colorspace, Document, Matrix, TextPageOptions};

use super::reader::{PdfPages, PdfReadError, PdfReader};
use super::types::{EmbeddedImage, PageImage};

/// PDF points per inch
const POINTS_PER_INCH: f32 = 72.0;

/// `PdfReader` backed by MuPDF
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfReader;

impl PdfReader for MupdfReader {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfPages>, PdfReadError> {
        let path_str = path.to_string_lossy();
        let doc = Document::open(&*path_str)
            .map_err(|e| PdfReadError::LoadError(e.to_string()))?;
        let page_count = doc.page_count()? as usize;

        Ok(Box::new(MupdfPages { doc, page_count }))
    }
}

struct MupdfPages {
    doc: Document,
    page_count: usize,
}

impl MupdfPages {
    fn load_page(&self, page: usize) -> Result<mupdf::Page, PdfReadError> {
        if page >= self.page_count {
            return Err(PdfReadError::PageNotFound(page, self.page_count));
        }
        Ok(self.doc.load_page(page as i32)?)
    }
}

impl PdfPages for MupdfPages {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn extract_text(&self, page: usize) -> Result<Option<String>, PdfReadError> {
        let page = self.load_page(page)?;
        let text_page = page
            .to_text_page(TextPageOptions::empty())
            .map_err(|e| PdfReadError::TextError(e.to_string()))?;
        let text = text_page
            .to_text()
            .map_err(|e| PdfReadError::TextError(e.to_string()))?;

        // Every line and block ends in "\n"; page separation is the caller's job
        let text = text.trim_end();
        Ok(if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        })
    }

    fn render_page(&self, page: usize, dpi: u32) -> Result<PageImage, PdfReadError> {
        let page = self.load_page(page)?;

        let scale = dpi as f32 / POINTS_PER_INCH;
        let matrix = Matrix::new_scale(scale, scale);

        // No alpha: OCR wants text on an opaque white page
        let colorspace = Colorspace::device_rgb();
        let pixmap = page
            .to_pixmap(&matrix, &colorspace, false, true)
            .map_err(|e| PdfReadError::RenderError(e.to_string()))?;

        encode_pixmap(&pixmap)
    }

    fn images(&self, page: usize) -> Result<Vec<EmbeddedImage>, PdfReadError> {
        let page = self.load_page(page)?;
        let text_page = page.to_text_page(TextPageOptions::PRESERVE_IMAGES)?;

        Ok(text_page
            .blocks()
            .filter(|block| matches!(block.r#type(), TextBlockType::Image))
            .map(|block| {
                let r = block.bounds();
                EmbeddedImage::from_bbox(r.x0 as f64, r.y0 as f64, r.x1 as f64, r.y1 as f64)
            })
            .collect())
    }
}

/// Encode an RGB pixmap as PNG
fn encode_pixmap(pixmap: &mupdf::Pixmap) -> Result<PageImage, PdfReadError> {
    let width = pixmap.width() as u32;
    let height = pixmap.height() as u32;
    let samples = pixmap.samples();
    let n = pixmap.n() as usize;

    let mut rgb_buffer = Vec::with_capacity((width * height * 3) as usize);

    for y in 0..height as usize {
        for x in 0..width as usize {
            let offset = (y * width as usize + x) * n;
            let r = samples.get(offset).copied().unwrap_or(255);
            let g = samples.get(offset + 1).copied().unwrap_or(255);
            let b = samples.get(offset + 2).copied().unwrap_or(255);
            rgb_buffer.extend_from_slice(&[r, g, b]);
        }
    }

    let img = RgbImage::from_raw(width, height, rgb_buffer)
        .ok_or_else(|| PdfReadError::ImageError("Failed to create image buffer".to_string()))?;

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| PdfReadError::ImageError(e.to_string()))?;

    Ok(PageImage { width, height, png })
}
