//! Paginated candidate-URL search.
//!
//! [`SearchProvider`] pages through a [`SearchEngine`] until the target count
//! of accepted URLs is reached or a page comes back empty.

mod serpapi;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::channel::ChannelStrategy;
use crate::error::DiscoveryError;
use crate::types::CandidateUrl;

pub use serpapi::{SerpApiClient, SerpApiSettings};

/// Provider page size cap; also the stride between page offsets.
pub const PAGE_SIZE: usize = 50;

/// Upper bound on pages requested per search, in case the provider keeps
/// returning results that the channel filter rejects.
pub const MAX_PAGES: usize = 10;

/// One page of organic result links from an external search API.
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Fetch up to `page_size` organic result links starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] on network, HTTP or provider-reported failure.
    async fn fetch_page(
        &self,
        query: &str,
        page_size: usize,
        offset: usize,
    ) -> Result<Vec<String>, DiscoveryError>;
}

/// Paginating wrapper around a [`SearchEngine`].
#[derive(Clone)]
pub struct SearchProvider {
    engine: Arc<dyn SearchEngine>,
    page_delay: Duration,
}

impl SearchProvider {
    #[must_use]
    pub fn new(engine: Arc<dyn SearchEngine>, page_delay: Duration) -> Self {
        Self { engine, page_delay }
    }

    /// Collect up to `target` URLs accepted by `strategy`.
    ///
    /// Provider errors are logged and yield an empty list.
    pub async fn search(
        &self,
        query: &str,
        strategy: &dyn ChannelStrategy,
        target: usize,
    ) -> Vec<CandidateUrl> {
        match self.try_search(query, strategy, target).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(
                    channel = %strategy.channel(),
                    error = %e,
                    "search provider failed, returning no candidates"
                );
                Vec::new()
            }
        }
    }

    /// Like [`SearchProvider::search`], but surfaces the provider error.
    ///
    /// # Errors
    ///
    /// Returns the first [`DiscoveryError`] reported by the engine.
    pub async fn try_search(
        &self,
        query: &str,
        strategy: &dyn ChannelStrategy,
        target: usize,
    ) -> Result<Vec<CandidateUrl>, DiscoveryError> {
        let channel = strategy.channel();
        let mut collected: Vec<CandidateUrl> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for page in 0..MAX_PAGES {
            if collected.len() >= target {
                break;
            }
            if page > 0 && !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }

            let page_size = PAGE_SIZE.min(target - collected.len());
            let offset = page * PAGE_SIZE;
            let links = self.engine.fetch_page(query, page_size, offset).await?;
            tracing::debug!(page, offset, returned = links.len(), "search page fetched");

            if links.is_empty() {
                break;
            }

            for link in links {
                if collected.len() >= target {
                    break;
                }
                let url = strip_query(&link);
                if url.is_empty() || !strategy.accepts_url(&url) || !seen.insert(url.clone()) {
                    continue;
                }
                collected.push(CandidateUrl {
                    url,
                    channel,
                    index: collected.len(),
                });
            }
        }

        tracing::info!(%channel, accepted = collected.len(), target, "search complete");
        Ok(collected)
    }
}

/// Link with everything from the first `?` removed, trimmed.
fn strip_query(link: &str) -> String {
    link.split('?').next().unwrap_or_default().trim().to_string()
}
