use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use vokab_config::document_stem;

use crate::error::OcrError;

/// Plain-text OCR result stored as `<stem>.txt`.
/// Never invalidated: delete the file to force a new extraction.
pub struct TextCache {
    path: PathBuf,
}

impl TextCache {
    pub fn for_document(cache_dir: &Path, document: &Path) -> Self {
        Self {
            path: cache_dir.join(format!("{}.txt", document_stem(document))),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached text, `None` when the file is missing or empty
    pub fn read(&self) -> Result<Option<String>, OcrError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.is_empty() => Ok(None),
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write(&self, text: &str) -> Result<(), OcrError> {
        fs::write(&self.path, text)?;
        Ok(())
    }
}
