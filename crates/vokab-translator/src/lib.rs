mod batch;
mod deepl;
mod google;

pub use batch::{FillReport, fill_missing};
pub use deepl::DeepLTranslator;
pub use google::GoogleTranslator;

use vokab_config::translator::TranslatorConfig;

pub type LanguageCode = String;

/// Source language value asking the provider to detect it
pub const AUTO_DETECT: &str = "auto";

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language, `from` may be [`AUTO_DETECT`]
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    /// Detected source language when the provider reports one
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

/// Build the provider named in the config
pub fn from_config(config: &TranslatorConfig) -> Result<Box<dyn Translator>, TranslateError> {
    let api_url = (!config.api_url.is_empty()).then(|| config.api_url.clone());

    match config.provider.to_lowercase().as_str() {
        "google" => Ok(Box::new(GoogleTranslator::new(api_url))),
        "deepl" => Ok(Box::new(DeepLTranslator::new(config.api_key.clone(), api_url))),
        other => Err(TranslateError::UnsupportedProvider(other.to_string())),
    }
}
