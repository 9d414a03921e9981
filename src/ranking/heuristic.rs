use tracing::debug;

use super::Ranker;
use super::scorer::relevance_scores;
use super::types::Candidate;

/// Deterministic ranker: arg-max over the shared relevance scores.
///
/// Ties break to the earliest index, so identical inputs always yield
/// identical output. No randomness, no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicRanker;

impl Ranker for HeuristicRanker {
    fn select(&self, candidates: &[Candidate], query: &str) -> Option<u64> {
        if candidates.is_empty() {
            return None;
        }

        let scores = relevance_scores(candidates, query);

        // Strict comparison keeps the first index on ties.
        let mut best = 0usize;
        for (idx, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = idx;
            }
        }

        debug!(
            candidates = candidates.len(),
            selected = candidates[best].id,
            score = scores[best],
            "heuristic selection"
        );

        Some(candidates[best].id)
    }
}
