use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vokab_types::PageRange;

fn default_document() -> PathBuf {
    PathBuf::from("book.pdf")
}

fn default_language() -> String {
    "eng".to_string()
}

fn default_threshold() -> u8 {
    150
}

fn default_blur_sigma() -> f32 {
    1.1
}

fn default_dpi() -> u16 {
    300
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct OcrConfig {
    /// Scanned book to extract
    #[serde(default = "default_document")]
    pub document: PathBuf,
    /// Pages to OCR, empty means all of them
    #[serde(default)]
    pub pages: Vec<PageRange>,
    /// Tesseract language model
    #[serde(default = "default_language")]
    pub language: String,
    /// Tesseract data directory, system default when unset
    pub tessdata: Option<String>,
    /// Grayscale cutoff for the inverse binary threshold
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    #[serde(default = "default_blur_sigma")]
    pub blur_sigma: f32,
    /// Render resolution for PDF pages
    #[serde(default = "default_dpi")]
    pub dpi: u16,
    /// Directory for `<stem>.txt` text caches
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            document: default_document(),
            pages: vec![],
            language: default_language(),
            tessdata: None,
            threshold: default_threshold(),
            blur_sigma: default_blur_sigma(),
            dpi: default_dpi(),
            cache_dir: default_cache_dir(),
        }
    }
}
