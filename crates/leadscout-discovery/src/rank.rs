use std::cmp::Ordering;

use leadscout_core::ScoredCandidate;

/// Order candidates by `confidence_score`, highest first.
///
/// Equal scores keep discovery order: the input position is an explicit
/// secondary key.
#[must_use]
pub fn rank(candidates: Vec<ScoredCandidate>) -> Vec<ScoredCandidate> {
    let mut indexed: Vec<(usize, ScoredCandidate)> = candidates.into_iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| {
        b.confidence_score
            .total_cmp(&a.confidence_score)
            .then_with(|| ia.cmp(ib))
    });
    indexed.into_iter().map(|(_, c)| c).collect()
}

/// True when `candidates` is non-increasing by score.
#[must_use]
pub fn is_ranked(candidates: &[ScoredCandidate]) -> bool {
    candidates.windows(2).all(|w| {
        w[0].confidence_score.total_cmp(&w[1].confidence_score) != Ordering::Less
    })
}
