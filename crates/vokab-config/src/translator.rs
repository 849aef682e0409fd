use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_provider() -> String {
    "google".to_string()
}

fn default_from_lang() -> String {
    "auto".to_string()
}

fn default_to_lang() -> String {
    "ru".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// `google` or `deepl`
    #[serde(default = "default_provider")]
    pub provider: String,
    /// `auto` lets the provider detect the source language
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(default)]
    pub api_key: String,
    /// Provider endpoint override, empty uses the provider's own
    #[serde(default)]
    pub api_url: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: default_provider(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            api_key: String::new(),
            api_url: String::new(),
        }
    }
}
