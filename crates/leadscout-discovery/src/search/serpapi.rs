//! HTTP client for the `SerpAPI` search endpoint.
//!
//! Wraps `reqwest` with `SerpAPI`-specific error handling. The response's
//! `"error"` field is surfaced as [`DiscoveryError::SearchApi`], except for the
//! provider's "no results" message which is an ordinary empty page.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::SearchEngine;
use crate::error::DiscoveryError;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/";
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

/// Request parameters that stay fixed for a client's lifetime.
#[derive(Debug, Clone)]
pub struct SerpApiSettings {
    pub engine: String,
    /// `gl` country parameter.
    pub locale: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
}

impl Default for SerpApiSettings {
    fn default() -> Self {
        Self {
            engine: "google".to_string(),
            locale: "us".to_string(),
            timeout_secs: 10,
            max_retries: 2,
            backoff_base_ms: 500,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    #[serde(default)]
    link: Option<String>,
}

/// Client for `GET <base>/search.json`.
///
/// Use [`SerpApiClient::new`] for production or [`SerpApiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
    settings: SerpApiSettings,
}

impl SerpApiClient {
    /// Creates a client pointed at the production `SerpAPI` endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, settings: SerpApiSettings) -> Result<Self, DiscoveryError> {
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
        settings: SerpApiSettings,
        base_url: &str,
    ) -> Result<Self, DiscoveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.timeout_secs.min(10)))
            .user_agent("leadscout/0.1 (lead-discovery)")
            .build()?;

        // Exactly one trailing slash so `join("search.json")` appends rather
        // than replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| DiscoveryError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            settings,
        })
    }

    fn build_url(&self, query: &str, page_size: usize, offset: usize) -> Result<Url, DiscoveryError> {
        let mut url = self
            .base_url
            .join("search.json")
            .map_err(|e| DiscoveryError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("engine", &self.settings.engine)
            .append_pair("api_key", &self.api_key)
            .append_pair("num", &page_size.to_string())
            .append_pair("start", &offset.to_string())
            .append_pair("gl", &self.settings.locale);
        Ok(url)
    }

    async fn request_page(&self, url: &Url) -> Result<Vec<String>, DiscoveryError> {
        // Never echo the URL: it carries the api key.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DiscoveryError::Http(e.without_url()))?;
        let status = response.status();
        let endpoint = format!("{}search.json", self.base_url);

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DiscoveryError::RateLimited { url: endpoint });
        }
        if status.is_server_error() {
            return Err(DiscoveryError::UnexpectedStatus {
                status: status.as_u16(),
                url: endpoint,
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| DiscoveryError::Http(e.without_url()))?;
        let body: serde_json::Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                return Err(DiscoveryError::Deserialize {
                    context: endpoint,
                    source: e,
                })
            }
            Err(_) => {
                return Err(DiscoveryError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: endpoint,
                })
            }
        };

        if let Some(message) = body.get("error").and_then(serde_json::Value::as_str) {
            if message.contains(NO_RESULTS_MARKER) {
                return Ok(Vec::new());
            }
            return Err(DiscoveryError::SearchApi(message.to_string()));
        }
        if !status.is_success() {
            return Err(DiscoveryError::UnexpectedStatus {
                status: status.as_u16(),
                url: endpoint,
            });
        }

        let parsed: SearchResponse =
            serde_json::from_value(body).map_err(|e| DiscoveryError::Deserialize {
                context: endpoint,
                source: e,
            })?;

        Ok(parsed
            .organic_results
            .into_iter()
            .filter_map(|r| r.link)
            .collect())
    }
}

#[async_trait]
impl SearchEngine for SerpApiClient {
    async fn fetch_page(
        &self,
        query: &str,
        page_size: usize,
        offset: usize,
    ) -> Result<Vec<String>, DiscoveryError> {
        let url = self.build_url(query, page_size, offset)?;
        retry_with_backoff(
            self.settings.max_retries,
            self.settings.backoff_base_ms,
            || self.request_page(&url),
        )
        .await
    }
}
