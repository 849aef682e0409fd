use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::dictionary::DictionaryConfig;
use self::ocr::OcrConfig;
use self::store::StoreConfig;
use self::translator::TranslatorConfig;

pub mod anki;
pub mod dictionary;
pub mod ocr;
pub mod store;
pub mod translator;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub dictionary: DictionaryConfig,
    pub store: StoreConfig,
    pub translator: TranslatorConfig,
    pub anki: AnkiConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {var}: {value}")]
    InvalidEnv { var: &'static str, value: String },
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load a JSON config file, falling back to defaults if it does not exist.
    /// Environment overrides are applied on top either way.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::new();
        }

        tracing::info!("Loading config from {}", path.display());
        let reader = BufReader::new(File::open(path)?);
        let mut config: Config = serde_json::from_reader(reader)?;
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(document) = env::var("VOKAB_DOCUMENT") {
            self.ocr.document = PathBuf::from(document);
        }

        if let Ok(pages) = env::var("VOKAB_PAGES") {
            self.ocr.pages = pages
                .split(',')
                .filter(|p| !p.trim().is_empty())
                .map(|p| p.parse())
                .collect::<Result<_, _>>()
                .map_err(|_| ConfigError::InvalidEnv {
                    var: "VOKAB_PAGES",
                    value: pages.clone(),
                })?;
        }

        if let Ok(language) = env::var("VOKAB_OCR_LANG") {
            self.ocr.language = language;
        }

        if let Ok(tessdata) = env::var("TESSDATA_PREFIX") {
            self.ocr.tessdata.get_or_insert(tessdata);
        }

        if let Ok(path) = env::var("VOKAB_DICTIONARY") {
            self.dictionary.path = PathBuf::from(path);
        }

        if let Ok(dir) = env::var("VOKAB_WORK_DIR") {
            self.store.work_dir = PathBuf::from(dir);
        }

        if let Ok(provider) = env::var("VOKAB_TRANSLATOR") {
            self.translator.provider = provider;
        }

        if let Ok(lang) = env::var("VOKAB_TARGET_LANG") {
            self.translator.to_lang = lang;
        }

        if let Ok(key) = env::var("DEEPL_API_KEY") {
            self.translator.api_key = key;
        }

        Ok(())
    }
}

/// File stem used to name every artifact derived from a document
pub fn document_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
