//! TMDb metadata provider.
//!
//! [`TmdbClient`] is explicitly constructed with an injected HTTP client and
//! API key; nothing here is process-global. The [`MovieProvider`] trait is
//! the seam the gateway depends on, with [`MockMovieProvider`] standing in
//! for tests.

pub mod error;
pub mod model;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::TmdbError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockMovieProvider;
pub use model::{CastMember, CrewMember, MovieDetails, MovieSummary};

use async_trait::async_trait;
use tracing::debug;

use model::{DetailResponse, SearchResponse};

/// Default TMDb API endpoint.
pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Movie metadata lookups required by the gateway.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// Free-text movie search, in provider relevance order.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, TmdbError>;

    /// Full details for one movie, including credits, keywords, and trailer.
    async fn details(&self, movie_id: u64) -> Result<MovieDetails, TmdbError>;

    /// Provider-curated recommendations for one movie.
    async fn recommendations(&self, movie_id: u64) -> Result<Vec<MovieSummary>, TmdbError>;
}

/// TMDb v3 REST client.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            base_url: TMDB_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (integration tests against a local stub).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, TmdbError> {
        let response: SearchResponse = self
            .http
            .get(format!("{}/search/movie", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", "en-US"),
                ("include_adult", "false"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(query, results = response.results.len(), "TMDb search");
        Ok(response.results)
    }

    async fn details(&self, movie_id: u64) -> Result<MovieDetails, TmdbError> {
        let response: DetailResponse = self
            .http
            .get(format!("{}/movie/{}", self.base_url, movie_id))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
                ("append_to_response", "credits,keywords,videos"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(movie_id, title = %response.title, "TMDb details");
        Ok(response.into_details())
    }

    async fn recommendations(&self, movie_id: u64) -> Result<Vec<MovieSummary>, TmdbError> {
        let response: SearchResponse = self
            .http
            .get(format!("{}/movie/{}/recommendations", self.base_url, movie_id))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
                ("page", "1"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(
            movie_id,
            results = response.results.len(),
            "TMDb recommendations"
        );
        Ok(response.results)
    }
}
