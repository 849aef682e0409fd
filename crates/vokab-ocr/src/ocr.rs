use tesseract::{OcrEngineMode, Tesseract};
use vokab_config::ocr::OcrConfig;

use crate::error::OcrError;

/// Treat the page as a single uniform block of text
const PAGE_SEG_MODE: &str = "6";

/// Tesseract handle shared by every page of a run.
/// The model loads on first use; a handle lost to a failed call is rebuilt on the next one.
pub struct OcrEngine {
    datapath: Option<String>,
    language: String,
    tesseract: Option<Tesseract>,
}

impl OcrEngine {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            datapath: config.tessdata.clone(),
            language: config.language.clone(),
            tesseract: None,
        }
    }

    fn load(&self) -> Result<Tesseract, OcrError> {
        tracing::debug!("Loading Tesseract model {}", self.language);
        Tesseract::new_with_oem(
            self.datapath.as_deref(),
            Some(&self.language),
            OcrEngineMode::LstmOnly,
        )
        .map_err(|e| OcrError::Tesseract(format!("init: {}", e)))?
        .set_variable("tessedit_pageseg_mode", PAGE_SEG_MODE)
        .map_err(|e| OcrError::Tesseract(format!("page segmentation: {}", e)))
    }

    /// Recognize text from PNG image bytes
    pub fn recognize(&mut self, image_bytes: &[u8]) -> Result<String, OcrError> {
        let tesseract = match self.tesseract.take() {
            Some(tesseract) => tesseract,
            None => self.load()?,
        };

        let mut tesseract = tesseract
            .set_image_from_mem(image_bytes)
            .map_err(|e| OcrError::Tesseract(format!("image: {}", e)))?
            .recognize()
            .map_err(|e| OcrError::Tesseract(format!("recognize: {}", e)))?;

        let text = tesseract
            .get_text()
            .map_err(|e| OcrError::Tesseract(format!("text: {}", e)));
        self.tesseract = Some(tesseract);
        text
    }
}
