//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use crate::ocr::probe_available;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub tesseract_available: bool,
}

/// GET /
///
/// Always 200; a missing or broken OCR engine only flips the flag.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let engine = state.ocr_engine().clone();

    // The probe spawns a process, keep it off the async workers
    let tesseract_available = tokio::task::spawn_blocking(move || probe_available(engine.as_ref()))
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: "ok",
        tesseract_available,
    })
}
