//! Probability-amplification ranker.
//!
//! Base scores are normalized into a probability distribution, the leading
//! candidate is amplified for `floor(sqrt(n))` rounds, and the final index is
//! drawn by categorical sampling. A small anomaly branch occasionally
//! discards the draw in favor of a different candidate. The amplification
//! schedule is borrowed from amplitude-amplification folklore; treat the
//! round count purely as a tunable constant.

use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use tracing::debug;

use super::Ranker;
use super::scorer::relevance_scores;
use super::types::Candidate;

/// Multiplier applied to the leading probability each amplification round.
pub(crate) const AMPLIFICATION_FACTOR: f64 = 1.5;
/// Chance that the sampled index is discarded for a different one.
pub(crate) const ANOMALY_PROBABILITY: f64 = 0.05;

/// Probabilistic ranker: repeated calls on identical input may return
/// different ids. That is intentional, in deliberate contrast to
/// [`HeuristicRanker`](super::HeuristicRanker).
#[derive(Debug, Clone, Copy, Default)]
pub struct AmplifiedRanker;

impl Ranker for AmplifiedRanker {
    fn select(&self, candidates: &[Candidate], query: &str) -> Option<u64> {
        // Call-local RNG: concurrent calls must not interfere with each
        // other's sequences.
        self.select_with_rng(&mut rand::thread_rng(), candidates, query)
    }
}

impl AmplifiedRanker {
    /// Selection with an injected random source, for statistical tests.
    pub fn select_with_rng<R: Rng>(
        &self,
        rng: &mut R,
        candidates: &[Candidate],
        query: &str,
    ) -> Option<u64> {
        if candidates.is_empty() {
            return None;
        }

        let scores = relevance_scores(candidates, query);
        let probabilities = amplified_distribution(&scores);

        let mut chosen = match WeightedIndex::new(&probabilities) {
            Ok(dist) => dist.sample(rng),
            // Every weight is zero when no candidate scored at all. Degenerate
            // but expected input: fall back to a uniform draw.
            Err(_) => rng.gen_range(0..candidates.len()),
        };

        if candidates.len() > 1 && rng.gen_bool(ANOMALY_PROBABILITY) {
            // Uniform over the remaining n-1 indices, never the chosen one.
            let mut alternative = rng.gen_range(0..candidates.len() - 1);
            if alternative >= chosen {
                alternative += 1;
            }
            debug!(from = chosen, to = alternative, "anomaly branch re-drew");
            chosen = alternative;
        }

        debug!(
            candidates = candidates.len(),
            selected = candidates[chosen].id,
            probability = probabilities[chosen],
            "amplified selection"
        );

        Some(candidates[chosen].id)
    }
}

/// Normalizes `scores` into a probability distribution and amplifies the
/// leading entry for `floor(sqrt(n))` rounds.
///
/// A zero score total substitutes a divisor of 1, producing an all-zero
/// vector that the sampler handles as a uniform draw.
pub(crate) fn amplified_distribution(scores: &[f64]) -> Vec<f64> {
    let total: f64 = scores.iter().sum();
    let divisor = if total == 0.0 { 1.0 } else { total };
    let mut probabilities: Vec<f64> = scores.iter().map(|score| score / divisor).collect();

    let iterations = (scores.len() as f64).sqrt().floor() as usize;
    let max_idx = max_index(&probabilities);
    amplify(&mut probabilities, max_idx, iterations);

    probabilities
}

/// Runs `iterations` amplification rounds against the fixed `max_idx` target.
///
/// The target is not re-evaluated between rounds. After each round the
/// remaining entries are rescaled so the vector still sums to 1; when the
/// others already sum to zero the rescale is skipped. The amplified entry is
/// capped at 1.0 so the rescale factor can never go negative.
pub(crate) fn amplify(probabilities: &mut [f64], max_idx: usize, iterations: usize) {
    for _ in 0..iterations {
        probabilities[max_idx] = (probabilities[max_idx] * AMPLIFICATION_FACTOR).min(1.0);

        let other_sum: f64 = probabilities
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != max_idx)
            .map(|(_, p)| p)
            .sum();

        if other_sum > 0.0 {
            let rescale = (1.0 - probabilities[max_idx]) / other_sum;
            for (idx, p) in probabilities.iter_mut().enumerate() {
                if idx != max_idx {
                    *p *= rescale;
                }
            }
        }
    }
}

/// First index attaining the maximum value.
fn max_index(values: &[f64]) -> usize {
    let mut best = 0usize;
    for (idx, value) in values.iter().enumerate().skip(1) {
        if *value > values[best] {
            best = idx;
        }
    }
    best
}
