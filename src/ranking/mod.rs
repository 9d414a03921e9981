//! Candidate selection over provider search results.
//!
//! When a text query resolves to more than one plausible movie, one of two
//! interchangeable rankers picks a single id out of the candidate list:
//!
//! - [`HeuristicRanker`] scores each candidate by lexical overlap with the
//!   query plus a popularity signal and deterministically picks the maximum.
//! - [`AmplifiedRanker`] converts the same scores into a probability
//!   distribution, iteratively amplifies the leading candidate, then samples
//!   from the result. Repeated calls on identical input may return different
//!   ids; that non-determinism is the component's defining behavior.
//!
//! Both rankers are pure, synchronous, and hold no cross-call state, so they
//! can be invoked concurrently without coordination.

pub mod amplified;
pub mod heuristic;
pub mod scorer;
pub mod types;


pub use amplified::AmplifiedRanker;
pub use heuristic::HeuristicRanker;
pub use scorer::relevance_scores;
pub use types::Candidate;

/// Picks a single candidate id for a query.
///
/// Returns `None` exactly when `candidates` is empty; callers must check
/// before dereferencing the result.
pub trait Ranker {
    fn select(&self, candidates: &[Candidate], query: &str) -> Option<u64>;
}
