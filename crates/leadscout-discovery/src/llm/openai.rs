//! OpenAI-compatible chat completions client.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::{json, Value};

use super::{build_client, endpoint, send_json, LanguageModel, LlmSettings, TEMPERATURE};
use crate::error::DiscoveryError;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/";

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    url: Url,
    settings: LlmSettings,
}

impl OpenAiClient {
    /// Creates a client pointed at the public OpenAI API.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, settings: LlmSettings) -> Result<Self, DiscoveryError> {
        Self::with_base_url(api_key, settings, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL, e.g. a self-hosted gateway.
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
        Ok(Self {
            client: build_client(settings.timeout_secs)?,
            api_key: api_key.to_owned(),
            url: endpoint(base_url, "v1/chat/completions")?,
            settings,
        })
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, DiscoveryError> {
        let body = json!({
            "model": self.settings.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": TEMPERATURE
        });

        let response = retry_with_backoff(
            self.settings.max_retries,
            self.settings.backoff_base_ms,
            || {
                let request = self
                    .client
                    .post(self.url.clone())
                    .bearer_auth(&self.api_key)
                    .json(&body);
                send_json(request, &self.url)
            },
        )
        .await?;

        response
            .get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|msg| msg.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| DiscoveryError::LanguageModel("response has no message content".into()))
    }
}
