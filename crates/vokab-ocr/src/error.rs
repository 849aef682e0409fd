use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Tesseract error: {0}")]
    Tesseract(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
