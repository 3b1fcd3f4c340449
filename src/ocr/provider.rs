//! OCR Engines
//!
//! Defines the engine trait and the Tesseract implementations.

use std::io::Write;
use std::process::Command;

use crate::pdf::PageImage;

use super::types::{OcrError, OcrParams, ProbeError};

/// OCR engine trait
///
/// Calls are blocking; callers run them off the async runtime.
pub trait OcrEngine: Send + Sync {
    /// Short engine name for logs
    fn name(&self) -> &'static str;

    /// Query the engine version, failing if the engine is absent or broken
    fn version(&self) -> Result<String, ProbeError>;

    /// Recognize the text of a rasterized page
    fn image_to_text(&self, image: &PageImage, params: &OcrParams) -> Result<String, OcrError>;
}

/// Collapse the version probe into an availability flag
pub fn probe_available(engine: &dyn OcrEngine) -> bool {
    match engine.version() {
        Ok(version) => {
            tracing::debug!(engine = engine.name(), %version, "OCR engine available");
            true
        }
        Err(e) => {
            tracing::debug!(engine = engine.name(), error = %e, "OCR engine unavailable");
            false
        }
    }
}

/// Tesseract driven through its command-line executable
pub struct TesseractCli {
    command: String,
}

impl TesseractCli {
    pub fn new(command: &str) -> Self {
        Self {
            command: command.to_string(),
        }
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrEngine for TesseractCli {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn version(&self) -> Result<String, ProbeError> {
        let output = Command::new(&self.command).arg("--version").output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ProbeError::Failed(stderr.trim().to_string()));
        }

        // Older releases print the banner on stderr
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        stdout
            .lines()
            .chain(stderr.lines())
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .ok_or_else(|| ProbeError::Failed("empty version output".to_string()))
    }

    fn image_to_text(&self, image: &PageImage, params: &OcrParams) -> Result<String, OcrError> {
        // Removed when dropped, including on the error paths below
        let mut input = tempfile::Builder::new()
            .prefix("ocr-input-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| OcrError::ProcessingError(format!("Failed to create temp file: {}", e)))?;

        input
            .write_all(&image.png)
            .and_then(|_| input.flush())
            .map_err(|e| OcrError::ProcessingError(format!("Failed to write temp file: {}", e)))?;

        let output = Command::new(&self.command)
            .arg(input.path())
            .arg("stdout")
            .arg("-l")
            .arg(&params.languages)
            .arg("--psm")
            .arg(params.page_seg_mode.number().to_string())
            .output()
            .map_err(|e| {
                OcrError::EngineUnavailable(format!("Failed to run {}: {}", self.command, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::ProcessingError(format!(
                "Tesseract failed: {}",
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Tesseract linked in-process through libtesseract
#[cfg(feature = "ocr-tesseract")]
pub struct TesseractLib {
    /// Languages loaded by the availability probe
    languages: String,
}

#[cfg(feature = "ocr-tesseract")]
impl TesseractLib {
    pub fn new(languages: &str) -> Self {
        Self {
            languages: languages.to_string(),
        }
    }
}

#[cfg(feature = "ocr-tesseract")]
impl OcrEngine for TesseractLib {
    fn name(&self) -> &'static str {
        "libtesseract"
    }

    fn version(&self) -> Result<String, ProbeError> {
        tesseract::Tesseract::new(None, Some(&self.languages))
            .map(|_| format!("libtesseract ({})", self.languages))
            .map_err(|e| ProbeError::Failed(e.to_string()))
    }

    fn image_to_text(&self, image: &PageImage, params: &OcrParams) -> Result<String, OcrError> {
        let mut tess = tesseract::Tesseract::new(None, Some(&params.languages))
            .map_err(|e| OcrError::EngineUnavailable(e.to_string()))?
            .set_image_from_mem(&image.png)
            .map_err(|e| OcrError::ProcessingError(format!("Failed to load page image: {}", e)))?;

        tess.set_page_seg_mode(params.page_seg_mode.into());

        tess.get_text()
            .map_err(|e| OcrError::ProcessingError(e.to_string()))
    }
}
