//! Application state management

use std::sync::Arc;

use crate::config::{Config, OcrConfig};
use crate::extraction::{Extractor, ExtractorSettings};
use crate::ocr::{OcrEngine, OcrParams};
use crate::pdf::{MupdfReader, PdfReader};

/// Shared application state
///
/// Holds no per-request data; every request gets its own scratch file.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    extractor: Extractor,
    ocr: Arc<dyn OcrEngine>,
}

impl AppState {
    /// Wire MuPDF and the configured Tesseract backend
    pub fn new(config: Config) -> Self {
        let reader: Arc<dyn PdfReader> = Arc::new(MupdfReader);
        let ocr = default_engine(&config.ocr);
        Self::with_backends(config, reader, ocr)
    }

    /// Build state around explicit backends
    pub fn with_backends(
        config: Config,
        reader: Arc<dyn PdfReader>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Self {
        let settings = ExtractorSettings {
            ocr: OcrParams {
                languages: config.ocr.languages.clone(),
                page_seg_mode: config.ocr.page_seg_mode,
            },
            dpi: config.ocr.dpi,
            scratch_dir: config.upload.scratch_dir.clone(),
        };
        let extractor = Extractor::new(reader, ocr.clone(), settings);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                extractor,
                ocr,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the extraction pipeline
    pub fn extractor(&self) -> &Extractor {
        &self.inner.extractor
    }

    /// Get the OCR engine
    pub fn ocr_engine(&self) -> &Arc<dyn OcrEngine> {
        &self.inner.ocr
    }
}

#[cfg(not(feature = "ocr-tesseract"))]
fn default_engine(config: &OcrConfig) -> Arc<dyn OcrEngine> {
    Arc::new(crate::ocr::TesseractCli::new(&config.command))
}

#[cfg(feature = "ocr-tesseract")]
fn default_engine(config: &OcrConfig) -> Arc<dyn OcrEngine> {
    Arc::new(crate::ocr::TesseractLib::new(&config.languages))
}
