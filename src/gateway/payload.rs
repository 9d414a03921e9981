//! Request and response DTOs for the gateway.

use serde::{Deserialize, Serialize};

use crate::lastfm::Soundtrack;
use crate::llm::Dialogue;
use crate::tmdb::MovieDetails;

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub use_quantum: bool,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub movie: EnrichedMovie,
    pub similar_movies: Vec<SimilarMovie>,
}

/// Provider details plus generated enrichment.
#[derive(Debug, Serialize)]
pub struct EnrichedMovie {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub summary: String,
    pub dialogues: Vec<Dialogue>,
    pub search_info: SearchInfo,
}

/// How the movie was resolved. Search responses carry the query trail;
/// direct id lookups carry `source`/`matched_by`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refined_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_by: Option<String>,
}

impl SearchInfo {
    pub fn from_search(original: &str, refined: &str, intent: &str) -> Self {
        Self {
            original_query: Some(original.to_string()),
            refined_query: Some(refined.to_string()),
            intent_type: Some(intent.to_string()),
            ..Self::default()
        }
    }

    pub fn direct() -> Self {
        Self {
            source: Some("direct".to_string()),
            matched_by: Some("id".to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarMovie {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: String,
    pub similarity_score: f64,
}

#[derive(Debug, Serialize)]
pub struct SoundtrackResponse {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    pub soundtrack: Soundtrack,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
}
