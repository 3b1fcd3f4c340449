//! iTongQuiz OCR Server Library
//!
//! PDF text extraction over HTTP. Native text layers are returned as-is;
//! documents without one are rasterized and run through Tesseract.
//! The server binary is in main.rs.
//!
//! # Modules
//!
//! - `extraction`: upload validation, scratch files, native/OCR fallback
//! - `pdf`: PDF reader seam and its MuPDF implementation
//! - `ocr`: OCR engine seam and the Tesseract backends
//! - `routes`: axum handlers and router

pub mod config;
pub mod error;
pub mod extraction;
pub mod ocr;
pub mod pdf;
pub mod routes;
pub mod state;
