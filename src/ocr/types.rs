//! OCR Types
//!
//! Engine parameters and error types for page-level OCR.

/// Tesseract page segmentation modes (`--psm`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSegMode {
    OsdOnly,
    AutoOsd,
    AutoOnly,
    Auto,
    SingleColumn,
    SingleBlockVertText,
    /// Assume a single uniform block of text
    #[default]
    SingleBlock,
    SingleLine,
    SingleWord,
    CircleWord,
    SingleChar,
    SparseText,
    SparseTextOsd,
    RawLine,
}

impl PageSegMode {
    /// Map Tesseract's numeric mode to the enum
    pub fn from_number(n: u8) -> Option<Self> {
        let mode = match n {
            0 => Self::OsdOnly,
            1 => Self::AutoOsd,
            2 => Self::AutoOnly,
            3 => Self::Auto,
            4 => Self::SingleColumn,
            5 => Self::SingleBlockVertText,
            6 => Self::SingleBlock,
            7 => Self::SingleLine,
            8 => Self::SingleWord,
            9 => Self::CircleWord,
            10 => Self::SingleChar,
            11 => Self::SparseText,
            12 => Self::SparseTextOsd,
            13 => Self::RawLine,
            _ => return None,
        };
        Some(mode)
    }

    pub fn number(self) -> u8 {
        match self {
            Self::OsdOnly => 0,
            Self::AutoOsd => 1,
            Self::AutoOnly => 2,
            Self::Auto => 3,
            Self::SingleColumn => 4,
            Self::SingleBlockVertText => 5,
            Self::SingleBlock => 6,
            Self::SingleLine => 7,
            Self::SingleWord => 8,
            Self::CircleWord => 9,
            Self::SingleChar => 10,
            Self::SparseText => 11,
            Self::SparseTextOsd => 12,
            Self::RawLine => 13,
        }
    }
}

#[cfg(feature = "ocr-tesseract")]
impl From<PageSegMode> for tesseract::PageSegMode {
    fn from(mode: PageSegMode) -> Self {
        use tesseract::PageSegMode as Psm;
        match mode {
            PageSegMode::OsdOnly => Psm::PsmOsdOnly,
            PageSegMode::AutoOsd => Psm::PsmAutoOsd,
            PageSegMode::AutoOnly => Psm::PsmAutoOnly,
            PageSegMode::Auto => Psm::PsmAuto,
            PageSegMode::SingleColumn => Psm::PsmSingleColumn,
            PageSegMode::SingleBlockVertText => Psm::PsmSingleBlockVertText,
            PageSegMode::SingleBlock => Psm::PsmSingleBlock,
            PageSegMode::SingleLine => Psm::PsmSingleLine,
            PageSegMode::SingleWord => Psm::PsmSingleWord,
            PageSegMode::CircleWord => Psm::PsmCircleWord,
            PageSegMode::SingleChar => Psm::PsmSingleChar,
            PageSegMode::SparseText => Psm::PsmSparseText,
            PageSegMode::SparseTextOsd => Psm::PsmSparseTextOsd,
            PageSegMode::RawLine => Psm::PsmRawLine,
        }
    }
}

/// Per-call OCR parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrParams {
    /// Language models, e.g. `vie+eng`
    pub languages: String,
    pub page_seg_mode: PageSegMode,
}

impl Default for OcrParams {
    fn default() -> Self {
        Self {
            languages: "vie+eng".to_string(),
            page_seg_mode: PageSegMode::SingleBlock,
        }
    }
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineUnavailable(String),

    #[error("OCR processing failed: {0}")]
    ProcessingError(String),
}

/// Engine version probe failure
///
/// Only ever observed through the health check, where it becomes `false`.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to launch OCR engine: {0}")]
    Launch(#[from] std::io::Error),

    #[error("OCR engine reported an error: {0}")]
    Failed(String),
}
