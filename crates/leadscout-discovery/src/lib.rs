//! Lead discovery pipeline.
//!
//! A [`SearchRequest`](leadscout_core::SearchRequest) is turned into a
//! channel-specific search query, candidate URLs are collected from the
//! search provider, each page is fetched and parsed, a language model scores
//! its sales-lead potential, and the resulting
//! [`ScoredCandidate`](leadscout_core::ScoredCandidate)s are ranked.
//!
//! Every stage returns `Result<_, DiscoveryError>` internally; the public
//! entry points ([`SearchProvider::search`], [`LeadAnalyzer::analyze`],
//! [`DiscoveryPipeline::discover`]) log failures and degrade to an empty or
//! zeroed value instead.

pub mod analyzer;
pub mod channel;
pub mod employee;
pub mod error;
pub mod extract;
pub mod llm;
pub mod mock;
pub mod pipeline;
pub mod rank;
pub(crate) mod retry;
pub mod scorer;
pub mod search;
pub mod types;

pub use analyzer::LeadAnalyzer;
pub use channel::{strategy_for, ChannelStrategy};
pub use employee::parse_employee_count;
pub use error::DiscoveryError;
pub use extract::{parse_page, ContentExtractor, HttpPageFetcher, PageFetcher};
pub use llm::{language_model_from_config, GeminiClient, LanguageModel, LlmSettings, OpenAiClient};
pub use mock::{generate_mock, generate_mock_seeded};
pub use pipeline::DiscoveryPipeline;
pub use rank::rank;
pub use scorer::confidence_score;
pub use search::{SearchEngine, SearchProvider, SerpApiClient, SerpApiSettings};
pub use types::{
    CandidateUrl, ChannelFields, CompanyInfo, DiscoveryConfig, DiscoveryReport, ExtractedContent,
    LeadAnalysis, MappedFields, ProfileInfo, SkippedCandidate,
};
