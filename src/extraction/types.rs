//! Request and response records for extraction

use serde::Serialize;

/// Rejection message for anything that is not a PDF (shown to end users)
pub const PDF_ONLY_MESSAGE: &str = "Chỉ hỗ trợ file PDF";

/// Upload rejected before any processing
#[derive(Debug, thiserror::Error)]
#[error("{}", PDF_ONLY_MESSAGE)]
pub struct InvalidInputError {
    pub filename: String,
}

/// Whether a filename names a PDF (case-insensitive `.pdf` suffix)
pub fn is_pdf_filename(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

/// An uploaded file that passed validation
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    filename: String,
    bytes: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(
        filename: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Result<Self, InvalidInputError> {
        let filename = filename.into();
        if !is_pdf_filename(&filename) {
            return Err(InvalidInputError { filename });
        }
        Ok(Self {
            filename,
            bytes: bytes.into(),
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// How the returned text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionMethod {
    /// Embedded text layer
    Native,
    /// Rasterized pages run through the OCR engine
    Ocr,
}

impl ExtractionMethod {
    /// Fall back to OCR only when the whole native text is blank
    pub fn decide(native_text: &str) -> Self {
        if native_text.trim().is_empty() {
            Self::Ocr
        } else {
            Self::Native
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Ocr => "ocr",
        }
    }
}

/// Result of `POST /extract`
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub text: String,
    #[serde(rename = "pages")]
    pub page_count: usize,
    pub method: ExtractionMethod,
}

impl ExtractionResult {
    pub fn new(text: String, page_count: usize, method: ExtractionMethod) -> Self {
        Self {
            success: true,
            text,
            page_count,
            method,
        }
    }
}

/// One embedded image, as reported by the reader
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageDescriptor {
    /// 1-based page number
    #[serde(rename = "page")]
    pub page_number: usize,
    /// 0-based position within the page
    pub index: usize,
    pub bbox: Option<[f64; 4]>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Result of `POST /extract-images`
#[derive(Debug, Clone, Serialize)]
pub struct ImageExtraction {
    pub success: bool,
    pub image_count: usize,
    pub images: Vec<ImageDescriptor>,
}

impl ImageExtraction {
    pub fn new(images: Vec<ImageDescriptor>) -> Self {
        Self {
            success: true,
            image_count: images.len(),
            images,
        }
    }
}

/// Concatenate page texts the way the service returns them
///
/// Pages are separated by exactly one blank line: trailing whitespace on each
/// page is dropped, blank pages are skipped, and the whole result is trimmed.
pub fn join_page_texts<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for page in pages {
        let page = page.as_ref().trim_end();
        if !page.is_empty() {
            joined.push_str(page);
            joined.push_str("\n\n");
        }
    }
    joined.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_filename_validation() {
        assert!(is_pdf_filename("de-thi.pdf"));
        assert!(is_pdf_filename("SCAN.PDF"));
        assert!(!is_pdf_filename("report.docx"));
        assert!(!is_pdf_filename("pdf"));
        assert!(!is_pdf_filename("notes.pdf.txt"));
    }

    #[test]
    fn test_uploaded_document_rejects_non_pdf() {
        let err = UploadedDocument::new("report.docx", b"PK".to_vec()).unwrap_err();
        assert_eq!(err.filename, "report.docx");
        assert_eq!(err.to_string(), PDF_ONLY_MESSAGE);
    }

    #[test]
    fn test_decide_method() {
        assert_eq!(ExtractionMethod::decide("Câu 1: 2 + 2 = ?"), ExtractionMethod::Native);
        assert_eq!(ExtractionMethod::decide(""), ExtractionMethod::Ocr);
        assert_eq!(ExtractionMethod::decide(" \n\t\n "), ExtractionMethod::Ocr);
    }

    #[test]
    fn test_join_skips_empty_pages_and_trims() {
        let joined = join_page_texts(["  Page one\n", "", "Page three  "]);
        assert_eq!(joined, "Page one\n\nPage three");
    }

    #[test]
    fn test_join_block_terminated_pages_keep_one_blank_line() {
        let joined = join_page_texts(["Câu 1\n\n", " \n", "Câu 2\nA. 4\n\n"]);
        assert_eq!(joined, "Câu 1\n\nCâu 2\nA. 4");
    }

    #[test]
    fn test_join_all_empty() {
        let pages: Vec<String> = vec![String::new(), String::new()];
        assert_eq!(join_page_texts(pages), "");
    }

    #[test]
    fn test_result_serialization_shape() {
        let result = ExtractionResult::new("abc".to_string(), 3, ExtractionMethod::Ocr);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "text": "abc", "pages": 3, "method": "ocr"})
        );
    }

    #[test]
    fn test_image_descriptor_keeps_missing_fields_null() {
        let descriptor = ImageDescriptor {
            page_number: 2,
            index: 0,
            bbox: None,
            width: None,
            height: Some(40.0),
        };
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "index": 0, "bbox": null, "width": null, "height": 40.0})
        );
    }
}
