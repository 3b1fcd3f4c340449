//! HTTP contract tests
//!
//! The PDF reader is scripted through the uploaded bytes: one line per page,
//! `text:<content>`, `scan`, `broken`, or `img:<x0>,<top>,<x1>,<bottom>`.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use itongquiz_ocr_server::config::Config;
use itongquiz_ocr_server::ocr::{OcrEngine, OcrError, OcrParams, ProbeError, TesseractCli};
use itongquiz_ocr_server::pdf::{EmbeddedImage, PageImage, PdfPages, PdfReadError, PdfReader};
use itongquiz_ocr_server::routes;
use itongquiz_ocr_server::state::AppState;

enum ScriptedPage {
    Text(String),
    Scan,
    Broken,
    Image([f64; 4]),
}

struct ScriptedReader {
    opens: AtomicUsize,
}

struct ScriptedDoc {
    pages: Vec<ScriptedPage>,
}

impl PdfReader for ScriptedReader {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfPages>, PdfReadError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let script = std::fs::read_to_string(path)
            .map_err(|e| PdfReadError::LoadError(e.to_string()))?;

        let pages = script
            .lines()
            .map(|line| {
                if let Some(text) = line.strip_prefix("text:") {
                    ScriptedPage::Text(text.to_string())
                } else if let Some(coords) = line.strip_prefix("img:") {
                    let v: Vec<f64> = coords.split(',').map(|n| n.parse().unwrap()).collect();
                    ScriptedPage::Image([v[0], v[1], v[2], v[3]])
                } else if line == "broken" {
                    ScriptedPage::Broken
                } else {
                    ScriptedPage::Scan
                }
            })
            .collect();

        Ok(Box::new(ScriptedDoc { pages }))
    }
}

impl ScriptedDoc {
    fn page(&self, page: usize) -> Result<&ScriptedPage, PdfReadError> {
        match &self.pages[page] {
            ScriptedPage::Broken => Err(PdfReadError::MuPdfError(format!(
                "syntax error on page {}",
                page + 1
            ))),
            other => Ok(other),
        }
    }
}

impl PdfPages for ScriptedDoc {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_text(&self, page: usize) -> Result<Option<String>, PdfReadError> {
        Ok(match self.page(page)? {
            ScriptedPage::Text(text) => Some(text.clone()),
            _ => None,
        })
    }

    fn render_page(&self, page: usize, _dpi: u32) -> Result<PageImage, PdfReadError> {
        self.page(page)?;
        Ok(PageImage {
            width: page as u32 + 1,
            height: 1,
            png: Vec::new(),
        })
    }

    fn images(&self, page: usize) -> Result<Vec<EmbeddedImage>, PdfReadError> {
        Ok(match self.page(page)? {
            ScriptedPage::Image([x0, top, x1, bottom]) => {
                vec![EmbeddedImage::from_bbox(*x0, *top, *x1, *bottom)]
            }
            _ => Vec::new(),
        })
    }
}

struct CountingOcr {
    calls: AtomicUsize,
}

impl OcrEngine for CountingOcr {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn version(&self) -> Result<String, ProbeError> {
        Ok("tesseract 5.3.0".to_string())
    }

    fn image_to_text(&self, image: &PageImage, _params: &OcrParams) -> Result<String, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("Trang quét {}", image.width))
    }
}

struct TestApp {
    server: TestServer,
    reader: Arc<ScriptedReader>,
    ocr: Arc<CountingOcr>,
    scratch_dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        Self::with_config(Config::default())
    }

    fn with_config(mut config: Config) -> Self {
        let scratch_dir = TempDir::new().unwrap();
        config.upload.scratch_dir = Some(scratch_dir.path().to_path_buf());

        let reader = Arc::new(ScriptedReader {
            opens: AtomicUsize::new(0),
        });
        let ocr = Arc::new(CountingOcr {
            calls: AtomicUsize::new(0),
        });

        let state = AppState::with_backends(config, reader.clone(), ocr.clone());
        let server = TestServer::new(routes::router(state)).unwrap();

        Self {
            server,
            reader,
            ocr,
            scratch_dir,
        }
    }

    fn upload(filename: &str, script: &str) -> MultipartForm {
        MultipartForm::new().add_part(
            "file",
            Part::bytes(script.as_bytes().to_vec())
                .file_name(filename)
                .mime_type("application/pdf"),
        )
    }

    fn ocr_calls(&self) -> usize {
        self.ocr.calls.load(Ordering::SeqCst)
    }

    fn reader_opens(&self) -> usize {
        self.reader.opens.load(Ordering::SeqCst)
    }

    fn leftover_scratch_files(&self) -> usize {
        std::fs::read_dir(self.scratch_dir.path()).unwrap().count()
    }
}

#[tokio::test]
async fn health_reports_engine_available() {
    let app = TestApp::new();

    let response = app.server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"status": "ok", "tesseract_available": true})
    );
}

#[tokio::test]
async fn health_never_fails_without_engine() {
    let state = AppState::with_backends(
        Config::default(),
        Arc::new(ScriptedReader {
            opens: AtomicUsize::new(0),
        }),
        Arc::new(TesseractCli::new("/nonexistent/bin/tesseract")),
    );
    let server = TestServer::new(routes::router(state)).unwrap();

    let response = server.get("/").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"status": "ok", "tesseract_available": false})
    );
}

#[tokio::test]
async fn extract_returns_native_text() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/extract")
        .multipart(TestApp::upload("de-thi.pdf", "text:Câu 1: 1 + 1 = ?\ntext:Câu 2: 2 + 2 = ?"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "text": "Câu 1: 1 + 1 = ?\n\nCâu 2: 2 + 2 = ?",
            "pages": 2,
            "method": "native"
        })
    );
    assert_eq!(app.ocr_calls(), 0);
    assert_eq!(app.leftover_scratch_files(), 0);
}

#[tokio::test]
async fn extract_falls_back_to_ocr_for_scans() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/extract")
        .multipart(TestApp::upload("SCAN.PDF", "scan\nscan\nscan"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["method"], "ocr");
    assert_eq!(body["pages"], 3);
    assert_eq!(body["text"], "Trang quét 1\n\nTrang quét 2\n\nTrang quét 3");
    assert_eq!(app.ocr_calls(), 3);
    assert_eq!(app.leftover_scratch_files(), 0);
}

#[tokio::test]
async fn extract_rejects_non_pdf_before_touching_disk() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/extract")
        .multipart(TestApp::upload("report.docx", "text:hello"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({"detail": "Chỉ hỗ trợ file PDF"}));
    assert_eq!(app.reader_opens(), 0);
    assert_eq!(app.leftover_scratch_files(), 0);
}

#[tokio::test]
async fn extract_images_rejects_non_pdf() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/extract-images")
        .multipart(TestApp::upload("photo.png", "img:0,0,1,1"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(app.reader_opens(), 0);
}

#[tokio::test]
async fn extract_failure_is_500_and_cleans_up() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/extract")
        .multipart(TestApp::upload("hong.pdf", "text:one\nbroken\ntext:three"))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Lỗi xử lý PDF: "));
    assert!(detail.contains("syntax error on page 2"));
    assert_eq!(app.reader_opens(), 1);
    assert_eq!(app.leftover_scratch_files(), 0);
}

#[tokio::test]
async fn extract_without_file_field_is_422() {
    let app = TestApp::new();

    let form = MultipartForm::new().add_text("note", "no file here");
    let response = app.server.post("/extract").multipart(form).await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.reader_opens(), 0);
}

#[tokio::test]
async fn extract_over_body_limit_is_413() {
    let mut config = Config::default();
    config.upload.max_bytes = 1024;
    let app = TestApp::with_config(config);

    let script = "text:Câu hỏi dài\n".repeat(256);
    let response = app
        .server
        .post("/extract")
        .multipart(TestApp::upload("lon.pdf", &script))
        .await;

    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(response.json::<Value>()["detail"].is_string());
    assert_eq!(app.reader_opens(), 0);
    assert_eq!(app.leftover_scratch_files(), 0);
}

#[tokio::test]
async fn extract_images_without_images() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/extract-images")
        .multipart(TestApp::upload("de-thi.pdf", "text:only words\nscan"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"success": true, "image_count": 0, "images": []})
    );
    assert_eq!(app.leftover_scratch_files(), 0);
}

#[tokio::test]
async fn extract_images_reports_placement() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/extract-images")
        .multipart(TestApp::upload("hinh.pdf", "text:intro\nimg:50,100,250,200"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "image_count": 1,
            "images": [{
                "page": 2,
                "index": 0,
                "bbox": [50.0, 100.0, 250.0, 200.0],
                "width": 200.0,
                "height": 100.0
            }]
        })
    );
    assert_eq!(app.ocr_calls(), 0);
}
