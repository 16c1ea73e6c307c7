//! Candidate page fetching and channel-aware content extraction.

mod page;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use leadscout_core::Channel;
use reqwest::Client;
use scraper::Html;

use crate::channel::strategy_for;
use crate::error::DiscoveryError;
use crate::retry::retry_with_backoff;
use crate::types::ExtractedContent;

pub use page::{MetaTags, ParsedPage};

/// Source of raw page HTML.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] on network failure or a non-2xx status.
    async fn fetch(&self, url: &str) -> Result<String, DiscoveryError>;
}

/// `reqwest`-backed fetcher sending browser-like headers.
pub struct HttpPageFetcher {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl HttpPageFetcher {
    /// Creates a fetcher with a bounded per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, DiscoveryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DiscoveryError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self
                .client
                .get(url)
                .header(
                    reqwest::header::ACCEPT,
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.5")
                .send()
                .await?;

            let status = response.status();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(DiscoveryError::RateLimited {
                    url: url.to_owned(),
                });
            }
            if !status.is_success() {
                return Err(DiscoveryError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            Ok(response.text().await?)
        })
        .await
    }
}

/// Fetches candidate pages and parses them into [`ExtractedContent`].
#[derive(Clone)]
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
}

impl ContentExtractor {
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// Fetch and parse one candidate page.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's [`DiscoveryError`] when the page cannot be retrieved.
    pub async fn try_extract(
        &self,
        url: &str,
        channel: Channel,
    ) -> Result<ExtractedContent, DiscoveryError> {
        let html = self.fetcher.fetch(url).await?;
        Ok(parse_page(url, &html, channel))
    }

    /// Like [`ContentExtractor::try_extract`], but logs failures and returns `None`.
    pub async fn extract(&self, url: &str, channel: Channel) -> Option<ExtractedContent> {
        match self.try_extract(url, channel).await {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!(url, %channel, error = %e, "content extraction failed");
                None
            }
        }
    }
}

/// Parse fetched HTML into [`ExtractedContent`] using the channel's rules.
///
/// Open Graph description and title are preferred over their plain
/// counterparts. `post_date` falls back to today's date when the page carries
/// no `article:published_time`.
#[must_use]
pub fn parse_page(url: &str, html: &str, channel: Channel) -> ExtractedContent {
    let document = Html::parse_document(html);
    let meta = MetaTags::from_document(&document);

    let content = meta.first_of(&["og:description", "description"]).to_string();
    let mut title = meta.first_of(&["og:title", "title"]).to_string();
    if title.is_empty() {
        title = page::document_title(&document);
    }
    let post_date = meta
        .get("article:published_time")
        .map_or_else(|| chrono::Utc::now().format("%Y-%m-%d").to_string(), str::to_string);

    let fields = strategy_for(channel).extract_fields(&ParsedPage {
        url,
        document: &document,
        meta: &meta,
        title: &title,
    });

    ExtractedContent {
        url: url.to_string(),
        title,
        content,
        post_date,
        fields,
    }
}
