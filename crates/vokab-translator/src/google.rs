use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

const DEFAULT_API_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Keyless Google Translate web endpoint
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
    api_url: String,
}

impl GoogleTranslator {
    pub fn new(api_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}

/// The endpoint answers with nested arrays:
/// `[[["кот","cat",null,null,10]],null,"en",...]`.
/// Translated segments live at `[0][i][0]`, the detected language at `[2]`.
fn parse_response(json: &serde_json::Value) -> Result<(String, Option<String>), TranslateError> {
    let segments = json
        .get(0)
        .and_then(|s| s.as_array())
        .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|t| t.as_str()))
        .collect();

    if text.is_empty() {
        return Err(TranslateError::ApiError("Empty translation".to_string()));
    }

    let detected = json.get(2).and_then(|l| l.as_str()).map(str::to_string);
    Ok((text, detected))
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("client", "gtx"),
                ("sl", from.as_str()),
                ("tl", to.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            TranslateError::ApiError(format!("Failed to parse response: {}", e))
        })?;

        let (translated, detected) = parse_response(&json)?;

        Ok(Translation {
            text: translated,
            from: detected.unwrap_or(from),
            to,
            provider: "google".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}
