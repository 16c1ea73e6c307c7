use std::time::Duration;

use leadscout_core::{AppConfig, Channel, ScoredCandidate};

/// A search hit that passed the channel's URL filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateUrl {
    /// Link with query string removed and whitespace trimmed.
    pub url: String,
    pub channel: Channel,
    /// Position in which the search provider yielded this URL.
    pub index: usize,
}

/// LinkedIn company page metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyInfo {
    pub name: String,
    pub industry: Option<String>,
    /// Raw size text such as `"51-200 employees"`.
    pub size: Option<String>,
    pub location: Option<String>,
}

/// LinkedIn profile details split out of the page title. Missing parts are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileInfo {
    pub name: String,
    pub role: String,
    pub company: String,
}

/// Per-channel fields pulled from a fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelFields {
    LinkedIn {
        company: Option<CompanyInfo>,
        profile: Option<ProfileInfo>,
    },
    Twitter {
        username: String,
        follower_count: Option<u64>,
        verified: bool,
    },
    Reddit {
        subreddit: String,
        score: i64,
        comment_count: u64,
    },
    Generic,
}

/// Structured content pulled from one candidate page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub url: String,
    pub title: String,
    pub content: String,
    /// `YYYY-MM-DD` or the raw published-time value from the page.
    pub post_date: String,
    pub fields: ChannelFields,
}

impl ExtractedContent {
    /// Content carrying only a URL; every other field empty.
    #[must_use]
    pub fn bare(url: impl Into<String>, post_date: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            content: String::new(),
            post_date: post_date.into(),
            fields: ChannelFields::Generic,
        }
    }
}

/// Model-reported lead scores. All numeric fields lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadAnalysis {
    pub intent_score: f64,
    pub decision_maker_score: f64,
    pub urgency_score: f64,
    pub relevance_score: f64,
    /// Informational only; not part of the ranking score.
    pub overall_confidence: f64,
    pub key_insights: Vec<String>,
}

/// Result-record fields derived from a channel's extracted content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedFields {
    pub company_name: String,
    pub contact_info: Option<String>,
    pub employee_count: Option<u64>,
    pub industry: Option<String>,
    pub location: Option<String>,
}

/// A candidate URL dropped before it produced a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCandidate {
    pub url: String,
    pub reason: String,
}

/// Full outcome of a discovery run.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Ranked results, highest confidence first.
    pub candidates: Vec<ScoredCandidate>,
    pub skipped: Vec<SkippedCandidate>,
    /// Number of URLs the search stage accepted.
    pub searched: usize,
}

/// Tuning for a discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    pub target_results: usize,
    pub page_delay: Duration,
    pub max_concurrent_candidates: usize,
    pub candidate_timeout: Duration,
}

impl DiscoveryConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            target_results: config.target_results,
            page_delay: Duration::from_millis(config.page_delay_ms),
            max_concurrent_candidates: config.max_concurrent_candidates,
            candidate_timeout: Duration::from_secs(config.candidate_timeout_secs),
        }
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            target_results: 10,
            page_delay: Duration::from_secs(2),
            max_concurrent_candidates: 4,
            candidate_timeout: Duration::from_secs(60),
        }
    }
}
