//! Weighted confidence score.
//!
//! `overall_confidence` from the model is informational and is not part of
//! the score.

use crate::types::LeadAnalysis;

pub const INTENT_WEIGHT: f64 = 0.35;
pub const DECISION_MAKER_WEIGHT: f64 = 0.25;
pub const URGENCY_WEIGHT: f64 = 0.20;
pub const RELEVANCE_WEIGHT: f64 = 0.20;

/// `intent×0.35 + decision_maker×0.25 + urgency×0.20 + relevance×0.20`,
/// rounded to two decimals.
#[must_use]
pub fn confidence_score(analysis: &LeadAnalysis) -> f64 {
    let raw = analysis.intent_score * INTENT_WEIGHT
        + analysis.decision_maker_score * DECISION_MAKER_WEIGHT
        + analysis.urgency_score * URGENCY_WEIGHT
        + analysis.relevance_score * RELEVANCE_WEIGHT;
    round2(raw)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
