use std::path::{Path, PathBuf};

use anyhow::Context;
use vokab_config::Config;
use vokab_types::PageRange;

/// Command-line values that win over the config file and environment
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub document: Option<PathBuf>,
    pub pages: Vec<PageRange>,
    pub out_dir: Option<PathBuf>,
    pub push: bool,
}

impl Overrides {
    pub fn apply(self, config: &mut Config) {
        if let Some(document) = self.document {
            config.ocr.document = document;
        }
        if !self.pages.is_empty() {
            config.ocr.pages = self.pages;
        }
        if let Some(out_dir) = self.out_dir {
            config.anki.out_dir = out_dir;
        }
        config.anki.push |= self.push;
    }
}

/// Load the profile at `path` (defaults when missing) and apply overrides
pub fn load_profile(path: &Path, overrides: Overrides) -> anyhow::Result<Config> {
    let mut config = Config::load(path)
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    overrides.apply(&mut config);

    tracing::debug!(
        "Document {}, pages {:?}, translator {} -> {}",
        config.ocr.document.display(),
        config.ocr.pages,
        config.translator.provider,
        config.translator.to_lang
    );
    Ok(config)
}
