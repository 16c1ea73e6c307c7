//! End-to-end discovery: search → extract → analyze → score → rank.
//!
//! Candidate URLs fan out through a bounded stream; each candidate runs
//! under its own timeout and a failure or timeout only skips that candidate.
//! Dropping the `discover` future drops every in-flight candidate future.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use leadscout_core::{AppConfig, ScoredCandidate, SearchRequest};

use crate::analyzer::LeadAnalyzer;
use crate::channel::{strategy_for, ChannelStrategy};
use crate::error::DiscoveryError;
use crate::extract::{ContentExtractor, HttpPageFetcher};
use crate::llm::language_model_from_config;
use crate::rank::rank;
use crate::scorer::confidence_score;
use crate::search::{SearchProvider, SerpApiClient, SerpApiSettings};
use crate::types::{CandidateUrl, DiscoveryConfig, DiscoveryReport, SkippedCandidate};

/// Wired-up discovery stages.
#[derive(Clone)]
pub struct DiscoveryPipeline {
    /// `None` when no search key is configured; every run is then empty.
    search: Option<SearchProvider>,
    extractor: ContentExtractor,
    analyzer: LeadAnalyzer,
    config: DiscoveryConfig,
}

impl DiscoveryPipeline {
    #[must_use]
    pub fn new(
        search: Option<SearchProvider>,
        extractor: ContentExtractor,
        analyzer: LeadAnalyzer,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            search,
            extractor,
            analyzer,
            config,
        }
    }

    /// Build the production pipeline from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] if an HTTP client cannot be constructed or a
    /// configured base URL is invalid.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, DiscoveryError> {
        let discovery = DiscoveryConfig::from_app_config(config);

        let search = match config.serpapi_api_key.as_deref() {
            Some(key) => {
                let settings = SerpApiSettings {
                    engine: config.search_engine.clone(),
                    locale: config.search_locale.clone(),
                    timeout_secs: config.request_timeout_secs,
                    max_retries: config.max_retries,
                    backoff_base_ms: config.retry_backoff_base_ms,
                };
                let client = SerpApiClient::with_base_url(key, settings, &config.search_base_url)?;
                Some(SearchProvider::new(Arc::new(client), discovery.page_delay))
            }
            None => {
                tracing::warn!("SERPAPI_API_KEY not set; live discovery disabled");
                None
            }
        };

        let fetcher = HttpPageFetcher::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_backoff_base_ms,
        )?;

        let model = language_model_from_config(config)?;
        if model.is_none() {
            tracing::warn!(
                provider = %config.llm_provider,
                "no language model key configured; every analysis will be zeroed"
            );
        }

        Ok(Self::new(
            search,
            ContentExtractor::new(Arc::new(fetcher)),
            LeadAnalyzer::from_model(model),
            discovery,
        ))
    }

    /// Whether a search provider is configured.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.search.is_some()
    }

    /// Ranked candidates for `request`; empty when nothing was found or the
    /// search provider is unavailable.
    pub async fn discover(&self, request: &SearchRequest) -> Vec<ScoredCandidate> {
        self.discover_report(request).await.candidates
    }

    /// Ranked candidates plus the URLs that were dropped and why.
    pub async fn discover_report(&self, request: &SearchRequest) -> DiscoveryReport {
        let channel = request.channel();
        let strategy = strategy_for(channel);

        let Some(search) = &self.search else {
            tracing::warn!(%channel, "no search provider configured, skipping discovery");
            return DiscoveryReport::default();
        };

        let query = strategy.build_query(&request.query);
        tracing::info!(%channel, query = %query, target = self.config.target_results, "starting discovery");

        let urls = search
            .search(&query, strategy, self.config.target_results)
            .await;
        let searched = urls.len();

        let width = self.config.max_concurrent_candidates.max(1);
        let outcomes: Vec<(CandidateUrl, Result<ScoredCandidate, DiscoveryError>)> =
            stream::iter(urls)
                .map(|candidate| async move {
                    let outcome = self.process_with_timeout(&candidate, request, strategy).await;
                    (candidate, outcome)
                })
                .buffered(width)
                .collect()
                .await;

        let mut scored = Vec::with_capacity(outcomes.len());
        let mut skipped = Vec::new();
        for (candidate, outcome) in outcomes {
            match outcome {
                Ok(result) => scored.push(result),
                Err(e) => {
                    tracing::warn!(url = %candidate.url, error = %e, "skipping candidate");
                    skipped.push(SkippedCandidate {
                        url: candidate.url,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let candidates = rank(scored);
        tracing::info!(
            %channel,
            searched,
            scored = candidates.len(),
            skipped = skipped.len(),
            "discovery complete"
        );

        DiscoveryReport {
            candidates,
            skipped,
            searched,
        }
    }

    async fn process_with_timeout(
        &self,
        candidate: &CandidateUrl,
        request: &SearchRequest,
        strategy: &dyn ChannelStrategy,
    ) -> Result<ScoredCandidate, DiscoveryError> {
        let budget = self.config.candidate_timeout;
        tokio::time::timeout(budget, self.process(candidate, request, strategy))
            .await
            .map_err(|_| DiscoveryError::Timeout {
                url: candidate.url.clone(),
                secs: budget.as_secs(),
            })?
    }

    async fn process(
        &self,
        candidate: &CandidateUrl,
        request: &SearchRequest,
        strategy: &dyn ChannelStrategy,
    ) -> Result<ScoredCandidate, DiscoveryError> {
        tracing::debug!(url = %candidate.url, index = candidate.index, "processing candidate");
        let content = self
            .extractor
            .try_extract(&candidate.url, candidate.channel)
            .await?;
        let analysis = self
            .analyzer
            .analyze(&content, &request.query, candidate.channel)
            .await;
        let mapped = strategy.map_to_result(&content);

        Ok(ScoredCandidate {
            company_name: mapped.company_name,
            contact_info: mapped.contact_info,
            channel_key: request.channel_key,
            confidence_score: confidence_score(&analysis),
            source: request.source_label(),
            source_link: content.url,
            employee_count: mapped.employee_count,
            industry: mapped.industry,
            location: mapped.location,
        })
    }
}
