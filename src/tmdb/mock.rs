//! In-memory movie provider for tests.

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::TmdbError;
use super::model::{MovieDetails, MovieSummary};
use super::MovieProvider;

/// Canned [`MovieProvider`] with per-method fixtures.
#[derive(Debug, Clone, Default)]
pub struct MockMovieProvider {
    search_results: Vec<MovieSummary>,
    details: HashMap<u64, MovieDetails>,
    recommendations: Vec<MovieSummary>,
}

impl MockMovieProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_results(mut self, results: Vec<MovieSummary>) -> Self {
        self.search_results = results;
        self
    }

    pub fn with_details(mut self, details: MovieDetails) -> Self {
        self.details.insert(details.id, details);
        self
    }

    pub fn with_recommendations(mut self, recommendations: Vec<MovieSummary>) -> Self {
        self.recommendations = recommendations;
        self
    }
}

#[async_trait]
impl MovieProvider for MockMovieProvider {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, TmdbError> {
        // Title-substring filter so similar-movie lookups resolve to the
        // matching fixture rather than the whole list.
        let lowered = query.to_lowercase();
        let matching: Vec<MovieSummary> = self
            .search_results
            .iter()
            .filter(|summary| summary.title.to_lowercase().contains(&lowered))
            .cloned()
            .collect();

        if matching.is_empty() {
            Ok(self.search_results.clone())
        } else {
            Ok(matching)
        }
    }

    async fn details(&self, movie_id: u64) -> Result<MovieDetails, TmdbError> {
        self.details
            .get(&movie_id)
            .cloned()
            .ok_or_else(|| TmdbError::UnexpectedResponse {
                reason: format!("no fixture for movie {movie_id}"),
            })
    }

    async fn recommendations(&self, _movie_id: u64) -> Result<Vec<MovieSummary>, TmdbError> {
        Ok(self.recommendations.clone())
    }
}
