//! Google Gemini `generateContent` client.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};

use super::{build_client, endpoint, send_json, LanguageModel, LlmSettings, TEMPERATURE};
use crate::error::DiscoveryError;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    url: Url,
    settings: LlmSettings,
}

impl GeminiClient {
    /// Creates a client pointed at the public Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, settings: LlmSettings) -> Result<Self, DiscoveryError> {
        Self::with_base_url(api_key, settings, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`DiscoveryError::InvalidUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        settings: LlmSettings,
        base_url: &str,
    ) -> Result<Self, DiscoveryError> {
        let url = endpoint(
            base_url,
            &format!("v1beta/models/{}:generateContent", settings.model),
        )?;
        Ok(Self {
            client: build_client(settings.timeout_secs)?,
            api_key: api_key.to_owned(),
            url,
            settings,
        })
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, DiscoveryError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": TEMPERATURE }
        });

        let response = retry_with_backoff(
            self.settings.max_retries,
            self.settings.backoff_base_ms,
            || {
                let request = self
                    .client
                    .post(self.url.clone())
                    .header("x-goog-api-key", &self.api_key)
                    .json(&body);
                send_json(request, &self.url)
            },
        )
        .await?;

        response_text(&response)
    }
}

/// Concatenated text parts of the first candidate.
fn response_text(body: &Value) -> Result<String, DiscoveryError> {
    let parts = body
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .ok_or_else(|| DiscoveryError::LanguageModel("Gemini response has no candidates".into()))?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();
    if text.is_empty() {
        return Err(DiscoveryError::LanguageModel(
            "Gemini response has no text parts".into(),
        ));
    }
    Ok(text)
}
