mod cache;
mod error;
mod ocr;
mod preprocess;
mod render;

pub use cache::TextCache;
pub use error::OcrError;
pub use ocr::OcrEngine;
pub use preprocess::{encode_png, preprocess};
pub use render::PdfRenderer;

use std::path::Path;

use vokab_config::ocr::OcrConfig;

/// Renders, cleans up and recognizes the selected pages of a PDF
pub struct PageExtractor<'c> {
    config: &'c OcrConfig,
    renderer: PdfRenderer,
    engine: OcrEngine,
}

impl<'c> PageExtractor<'c> {
    pub fn new(config: &'c OcrConfig) -> Result<Self, OcrError> {
        Ok(Self {
            config,
            renderer: PdfRenderer::new()?,
            engine: OcrEngine::new(config),
        })
    }

    /// Page texts concatenated in page order
    pub fn extract(&mut self, document: &Path) -> Result<String, OcrError> {
        let mut text = String::new();
        let config = self.config;
        let engine = &mut self.engine;

        self.renderer
            .for_each_page(document, &config.pages, config.dpi, |page, image| {
                tracing::info!("Extracting text from page {}", page);
                let processed = preprocess(&image, config.threshold, config.blur_sigma);
                let png = encode_png(&processed)?;
                text.push_str(&engine.recognize(&png)?);
                Ok(())
            })?;

        Ok(text)
    }
}

/// Text of the configured document, from the cache when one exists
pub fn extract_text(config: &OcrConfig) -> Result<String, OcrError> {
    let cache = TextCache::for_document(&config.cache_dir, &config.document);
    if let Some(text) = cache.read()? {
        tracing::info!("Using cached text file {}", cache.path().display());
        return Ok(text);
    }

    if !config.document.exists() {
        return Err(OcrError::DocumentNotFound(config.document.clone()));
    }

    tracing::info!(
        "Extracting text from {} ({})",
        config.document.display(),
        config.language
    );
    let text = PageExtractor::new(config)?.extract(&config.document)?;
    cache.write(&text)?;
    tracing::info!("Cached extracted text in {}", cache.path().display());

    Ok(text)
}
