//! Text and image-metadata extraction over a scratch copy of the upload

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::ocr::{OcrEngine, OcrParams};
use crate::pdf::{PdfPages, PdfReader};

use super::error::ExtractionError;
use super::scratch::ScratchFile;
use super::types::{
    join_page_texts, ExtractionMethod, ExtractionResult, ImageDescriptor, ImageExtraction,
    UploadedDocument,
};

/// Extractor settings
#[derive(Debug, Clone)]
pub struct ExtractorSettings {
    /// Engine parameters for scanned pages
    pub ocr: OcrParams,
    /// Rasterization resolution for scanned pages
    pub dpi: u32,
    /// Where scratch PDFs are created (system temp dir when `None`)
    pub scratch_dir: Option<PathBuf>,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            ocr: OcrParams::default(),
            dpi: 300,
            scratch_dir: None,
        }
    }
}

/// Runs native extraction with an all-or-nothing OCR fallback
///
/// Pages are processed sequentially. All methods block; the async variants
/// move the work to the blocking pool.
#[derive(Clone)]
pub struct Extractor {
    reader: Arc<dyn PdfReader>,
    ocr: Arc<dyn OcrEngine>,
    settings: ExtractorSettings,
}

impl Extractor {
    pub fn new(
        reader: Arc<dyn PdfReader>,
        ocr: Arc<dyn OcrEngine>,
        settings: ExtractorSettings,
    ) -> Self {
        Self {
            reader,
            ocr,
            settings,
        }
    }

    pub fn settings(&self) -> &ExtractorSettings {
        &self.settings
    }

    /// Extract the document text, falling back to OCR when there is no text layer
    pub fn extract_text(
        &self,
        upload: &UploadedDocument,
    ) -> Result<ExtractionResult, ExtractionError> {
        let started = Instant::now();
        let scratch = self.create_scratch(upload)?;

        let (text, page_count, method) = self.read_text(scratch.path())?;

        scratch.release().map_err(ExtractionError::Scratch)?;

        tracing::info!(
            file_name = %upload.filename(),
            pages = page_count,
            method = method.as_str(),
            chars = text.chars().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Text extraction complete"
        );

        Ok(ExtractionResult::new(text, page_count, method))
    }

    /// List embedded images with their placement, without decoding pixels
    pub fn extract_images(
        &self,
        upload: &UploadedDocument,
    ) -> Result<ImageExtraction, ExtractionError> {
        let started = Instant::now();
        let scratch = self.create_scratch(upload)?;

        let images = self.read_images(scratch.path())?;

        scratch.release().map_err(ExtractionError::Scratch)?;

        tracing::info!(
            file_name = %upload.filename(),
            images = images.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Image extraction complete"
        );

        Ok(ImageExtraction::new(images))
    }

    /// `extract_text` on the blocking pool
    pub async fn extract_text_async(
        &self,
        upload: UploadedDocument,
    ) -> Result<ExtractionResult, ExtractionError> {
        let extractor = self.clone();
        tokio::task::spawn_blocking(move || extractor.extract_text(&upload))
            .await
            .map_err(|e| ExtractionError::Task(format!("Task join error: {}", e)))?
    }

    /// `extract_images` on the blocking pool
    pub async fn extract_images_async(
        &self,
        upload: UploadedDocument,
    ) -> Result<ImageExtraction, ExtractionError> {
        let extractor = self.clone();
        tokio::task::spawn_blocking(move || extractor.extract_images(&upload))
            .await
            .map_err(|e| ExtractionError::Task(format!("Task join error: {}", e)))?
    }

    fn create_scratch(&self, upload: &UploadedDocument) -> Result<ScratchFile, ExtractionError> {
        let scratch = ScratchFile::create(self.settings.scratch_dir.as_deref(), upload.bytes())
            .map_err(ExtractionError::Scratch)?;

        tracing::debug!(
            file_name = %upload.filename(),
            size = upload.bytes().len(),
            scratch = %scratch.path().display(),
            "Upload written to scratch file"
        );

        Ok(scratch)
    }

    fn read_text(
        &self,
        path: &Path,
    ) -> Result<(String, usize, ExtractionMethod), ExtractionError> {
        let doc = self.reader.open(path)?;
        let page_count = doc.page_count();

        let mut native_pages = Vec::with_capacity(page_count);
        for page in 0..page_count {
            native_pages.push(doc.extract_text(page)?);
        }
        let native_text = join_page_texts(native_pages.into_iter().flatten());

        match ExtractionMethod::decide(&native_text) {
            ExtractionMethod::Native => Ok((native_text, page_count, ExtractionMethod::Native)),
            ExtractionMethod::Ocr => {
                tracing::debug!(pages = page_count, "No text layer, falling back to OCR");
                let text = self.ocr_pages(doc.as_ref())?;
                Ok((text, page_count, ExtractionMethod::Ocr))
            }
        }
    }

    fn ocr_pages(&self, doc: &dyn PdfPages) -> Result<String, ExtractionError> {
        let mut pages = Vec::with_capacity(doc.page_count());

        for page in 0..doc.page_count() {
            let image = doc.render_page(page, self.settings.dpi)?;
            let text = self.ocr.image_to_text(&image, &self.settings.ocr)?;

            tracing::debug!(
                engine = self.ocr.name(),
                page = page + 1,
                width = image.width,
                height = image.height,
                chars = text.chars().count(),
                "Page OCR complete"
            );
            pages.push(text);
        }

        Ok(join_page_texts(pages))
    }

    fn read_images(&self, path: &Path) -> Result<Vec<ImageDescriptor>, ExtractionError> {
        let doc = self.reader.open(path)?;
        let mut descriptors = Vec::new();

        for page in 0..doc.page_count() {
            for (index, image) in doc.images(page)?.into_iter().enumerate() {
                descriptors.push(ImageDescriptor {
                    page_number: page + 1,
                    index,
                    bbox: image.bbox,
                    width: image.width,
                    height: image.height,
                });
            }
        }

        Ok(descriptors)
    }
}
