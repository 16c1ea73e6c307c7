//! Single-turn language-model clients used by the lead analyzer.

mod gemini;
mod openai;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use leadscout_core::{AppConfig, LlmProvider};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::DiscoveryError;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

/// Sampling temperature for lead scoring; low so repeated runs agree.
const TEMPERATURE: f64 = 0.2;

/// Prompt in, text out.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send `prompt` as a single user turn and return the model's text reply.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] on network failure, a non-2xx status, or a
    /// response without any text.
    async fn complete(&self, prompt: &str) -> Result<String, DiscoveryError>;
}

/// Connection settings shared by both providers.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

/// Build the configured model client, or `None` when no API key is set.
///
/// # Errors
///
/// Returns [`DiscoveryError`] if the HTTP client or base URL is invalid.
pub fn language_model_from_config(
    config: &AppConfig,
) -> Result<Option<Arc<dyn LanguageModel>>, DiscoveryError> {
    let Some(api_key) = config.llm_api_key.as_deref() else {
        return Ok(None);
    };
    let settings = LlmSettings {
        model: config.llm_model.clone(),
        timeout_secs: config.llm_timeout_secs,
        max_retries: config.max_retries,
        backoff_base_ms: config.retry_backoff_base_ms,
    };
    let model: Arc<dyn LanguageModel> = match config.llm_provider {
        LlmProvider::Gemini => Arc::new(GeminiClient::with_base_url(
            api_key,
            settings,
            &config.llm_base_url,
        )?),
        LlmProvider::OpenAi => Arc::new(OpenAiClient::with_base_url(
            api_key,
            settings,
            &config.llm_base_url,
        )?),
    };
    Ok(Some(model))
}

fn build_client(timeout_secs: u64) -> Result<Client, DiscoveryError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .user_agent("leadscout/0.1 (lead-discovery)")
        .build()?)
}

/// Parse `base_url`, normalised to one trailing slash, and join `path`.
fn endpoint(base_url: &str, path: &str) -> Result<Url, DiscoveryError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised)
        .and_then(|base| base.join(path))
        .map_err(|e| DiscoveryError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })
}

/// Send a prepared POST, map error statuses, and parse the JSON body.
async fn send_json(request: reqwest::RequestBuilder, url: &Url) -> Result<Value, DiscoveryError> {
    let response = request.send().await?;
    let status = response.status();
    // Drop the query string: Gemini keys may be passed there by proxies.
    let mut shown = url.clone();
    shown.set_query(None);

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(DiscoveryError::RateLimited {
            url: shown.to_string(),
        });
    }
    if !status.is_success() {
        return Err(DiscoveryError::UnexpectedStatus {
            status: status.as_u16(),
            url: shown.to_string(),
        });
    }

    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| DiscoveryError::Deserialize {
        context: shown.to_string(),
        source: e,
    })
}
