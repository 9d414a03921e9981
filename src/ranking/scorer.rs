//! Relevance scorer shared by both rankers.
//!
//! Scoring is whole-token set intersection on lower-cased, whitespace-split
//! text for both the title and the overview. Substring matching was
//! deliberately rejected: it lets a query term like `mat` claim a match
//! against `matrix`.

use std::collections::HashSet;

use super::types::Candidate;

/// Weight applied to each query term found in the title token set.
pub(crate) const TITLE_MATCH_WEIGHT: f64 = 3.0;
/// Weight applied to each query term found in the overview token set.
pub(crate) const OVERVIEW_MATCH_WEIGHT: f64 = 1.0;
/// Fixed normalization constant for the provider popularity signal.
pub(crate) const POPULARITY_DIVISOR: f64 = 20.0;

/// Scores every candidate against `query`.
///
/// Returns one score per candidate, in input order. Duplicate query terms
/// collapse into a set before matching. An empty query yields a term set of
/// zero, so scores degenerate to `popularity / 20` alone.
pub fn relevance_scores(candidates: &[Candidate], query: &str) -> Vec<f64> {
    let lowered = query.to_lowercase();
    let query_terms: HashSet<&str> = lowered.split_whitespace().collect();

    candidates
        .iter()
        .map(|candidate| {
            let title = candidate.title.to_lowercase();
            let overview = candidate.overview.to_lowercase();
            let title_tokens: HashSet<&str> = title.split_whitespace().collect();
            let overview_tokens: HashSet<&str> = overview.split_whitespace().collect();

            let title_matches = query_terms
                .iter()
                .filter(|term| title_tokens.contains(**term))
                .count() as f64;
            let overview_matches = query_terms
                .iter()
                .filter(|term| overview_tokens.contains(**term))
                .count() as f64;

            title_matches * TITLE_MATCH_WEIGHT
                + overview_matches * OVERVIEW_MATCH_WEIGHT
                + candidate.popularity / POPULARITY_DIVISOR
        })
        .collect()
}
