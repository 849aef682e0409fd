use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    AUTO_DETECT, LanguageCode, ProviderMetadata, TranslateError, Translation, Translator,
};

const DEFAULT_API_URL: &str = "https://api-free.deepl.com/v2/translate";

#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl DeepLTranslator {
    pub fn new(api_key: String, api_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}

#[derive(Deserialize)]
struct DeepLResponse {
    translations: Vec<DeepLTranslation>,
}

#[derive(Deserialize)]
struct DeepLTranslation {
    text: String,
    detected_source_language: Option<String>,
}

fn parse_response(body: &str) -> Result<(String, Option<String>), TranslateError> {
    let response: DeepLResponse = serde_json::from_str(body)
        .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {}", e)))?;

    let first = response
        .translations
        .into_iter()
        .next()
        .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

    Ok((
        first.text,
        first.detected_source_language.map(|l| l.to_lowercase()),
    ))
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let target = to.to_uppercase();
        let mut params = vec![("text", text.to_string()), ("target_lang", target)];
        if from != AUTO_DETECT {
            params.push(("source_lang", from.to_uppercase()));
        }

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let (translated, detected) = parse_response(&response.text().await?)?;

        Ok(Translation {
            text: translated,
            from: detected.unwrap_or(from),
            to,
            provider: "deepl".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}
