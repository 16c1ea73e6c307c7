//! Language-model lead analysis.
//!
//! [`LeadAnalyzer::analyze`] never fails: any model, parse or validation
//! failure degrades to a zeroed [`LeadAnalysis`] so one bad candidate does not
//! abort the batch. [`LeadAnalyzer::analyze_checked`] exposes the failure.

mod parse;
mod prompt;

use std::sync::Arc;

use leadscout_core::Channel;

use crate::error::DiscoveryError;
use crate::llm::LanguageModel;
use crate::types::{ExtractedContent, LeadAnalysis};

pub use prompt::build_prompt;

#[derive(Clone)]
pub struct LeadAnalyzer {
    model: Option<Arc<dyn LanguageModel>>,
}

impl LeadAnalyzer {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model: Some(model) }
    }

    /// Analyzer without a model; every analysis is zeroed.
    #[must_use]
    pub fn disabled() -> Self {
        Self { model: None }
    }

    #[must_use]
    pub fn from_model(model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self { model }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.model.is_some()
    }

    /// Score one page, falling back to [`LeadAnalysis::default`] on any failure.
    pub async fn analyze(
        &self,
        content: &ExtractedContent,
        query: &str,
        channel: Channel,
    ) -> LeadAnalysis {
        match self.analyze_checked(content, query, channel).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::warn!(
                    url = %content.url,
                    %channel,
                    error = %e,
                    "lead analysis failed, using zeroed scores"
                );
                LeadAnalysis::default()
            }
        }
    }

    /// Score one page.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::LanguageModel`] when no model is configured,
    /// the model client's error when the call fails, or
    /// [`DiscoveryError::Parse`] when the reply holds no JSON object.
    pub async fn analyze_checked(
        &self,
        content: &ExtractedContent,
        query: &str,
        channel: Channel,
    ) -> Result<LeadAnalysis, DiscoveryError> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| DiscoveryError::LanguageModel("no language model configured".into()))?;

        let prompt = build_prompt(content, query, channel);
        let raw = model.complete(&prompt).await?;
        let analysis = parse::parse_analysis(&raw)?;
        tracing::debug!(
            url = %content.url,
            intent = analysis.intent_score,
            decision_maker = analysis.decision_maker_score,
            urgency = analysis.urgency_score,
            relevance = analysis.relevance_score,
            "lead analysis complete"
        );
        Ok(analysis)
    }
}
