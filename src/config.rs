//! Configuration management for the OCR server

use std::env;
use std::path::PathBuf;

use crate::ocr::PageSegMode;

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Maximum request body size in bytes
    pub max_bytes: usize,
    /// Directory for scratch PDFs (system temp dir when unset)
    pub scratch_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract executable
    pub command: String,
    /// Language models joined with `+`
    pub languages: String,
    pub page_seg_mode: PageSegMode,
    /// Rasterization resolution for scanned pages
    pub dpi: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            upload: UploadConfig {
                max_bytes: 50 * 1024 * 1024,
                scratch_dir: None,
            },
            ocr: OcrConfig::default(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        OcrConfig {
            command: "tesseract".to_string(),
            languages: "vie+eng".to_string(),
            page_seg_mode: PageSegMode::SingleBlock,
            dpi: 300,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT")?.unwrap_or(defaults.server.port),
            },
            upload: UploadConfig {
                max_bytes: match parse_var::<usize>("MAX_UPLOAD_MB")? {
                    Some(mb) => upload_limit_bytes(mb)?,
                    None => defaults.upload.max_bytes,
                },
                scratch_dir: env::var("SCRATCH_DIR").ok().map(PathBuf::from),
            },
            ocr: OcrConfig {
                command: env::var("TESSERACT_CMD").unwrap_or(defaults.ocr.command),
                languages: env::var("OCR_LANGUAGES").unwrap_or(defaults.ocr.languages),
                page_seg_mode: match parse_var::<u8>("OCR_PSM")? {
                    Some(n) => PageSegMode::from_number(n).ok_or(ConfigError::Invalid {
                        key: "OCR_PSM",
                        value: n.to_string(),
                    })?,
                    None => defaults.ocr.page_seg_mode,
                },
                dpi: parse_var("OCR_DPI")?.unwrap_or(defaults.ocr.dpi),
            },
        })
    }
}

/// Convert `MAX_UPLOAD_MB` to bytes, rejecting sizes that overflow `usize`
fn upload_limit_bytes(mb: usize) -> Result<usize, ConfigError> {
    mb.checked_mul(1024 * 1024).ok_or(ConfigError::Invalid {
        key: "MAX_UPLOAD_MB",
        value: mb.to_string(),
    })
}

/// Read and parse an optional variable; unset or empty means "use the default"
fn parse_var<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
        _ => Ok(None),
    }
}
