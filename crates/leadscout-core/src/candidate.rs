use serde::{Deserialize, Serialize};

use crate::channel::{source_label, Channel};

/// Input to a discovery run, supplied by the API layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text description of what the prospect needs.
    pub query: String,
    /// Channel name as stored by the caller (e.g. `"reddit"`).
    pub channel_name: String,
    /// Caller's numeric key for the channel, echoed on every result.
    pub channel_key: i64,
}

impl SearchRequest {
    #[must_use]
    pub fn new(query: impl Into<String>, channel_name: impl Into<String>, channel_key: i64) -> Self {
        Self {
            query: query.into(),
            channel_name: channel_name.into(),
            channel_key,
        }
    }

    #[must_use]
    pub fn channel(&self) -> Channel {
        Channel::from_name(&self.channel_name)
    }

    /// Label written into [`ScoredCandidate::source`].
    #[must_use]
    pub fn source_label(&self) -> String {
        source_label(&self.channel_name)
    }
}

/// One ranked lead handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    pub company_name: String,
    pub contact_info: Option<String>,
    pub channel_key: i64,
    /// Weighted score in `[0.0, 1.0]`, rounded to two decimals.
    pub confidence_score: f64,
    pub source: String,
    pub source_link: String,
    pub employee_count: Option<u64>,
    pub industry: Option<String>,
    pub location: Option<String>,
}
