use std::path::Path;

use image::DynamicImage;
use pdfium_render::prelude::*;
use vokab_types::{PageRange, page_selected};

use crate::error::OcrError;

const PDF_POINTS_PER_INCH: f32 = 72.0;

pub struct PdfRenderer {
    pdfium: Pdfium,
}

impl PdfRenderer {
    /// Bind pdfium from the working directory, falling back to the system library
    pub fn new() -> Result<Self, OcrError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| OcrError::Pdf(format!("Failed to bind pdfium: {}", e)))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Render each selected page in order and hand it to `visit` with its 1-based number
    pub fn for_each_page<F>(
        &self,
        path: &Path,
        ranges: &[PageRange],
        dpi: u16,
        mut visit: F,
    ) -> Result<(), OcrError>
    where
        F: FnMut(u32, DynamicImage) -> Result<(), OcrError>,
    {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| OcrError::Pdf(format!("Failed to open {}: {}", path.display(), e)))?;

        let scale = dpi as f32 / PDF_POINTS_PER_INCH;

        for (index, page) in document.pages().iter().enumerate() {
            let number = index as u32 + 1;
            if !page_selected(ranges, number) {
                continue;
            }

            let config = PdfRenderConfig::new()
                .set_target_width(((page.width().value * scale) as i32).max(1))
                .set_target_height(((page.height().value * scale) as i32).max(1));

            let image = page
                .render_with_config(&config)
                .map_err(|e| OcrError::Pdf(format!("Failed to render page {}: {}", number, e)))?
                .as_image();

            visit(number, image)?;
        }

        Ok(())
    }
}
