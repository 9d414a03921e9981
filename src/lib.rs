//! Cinesearch library crate (used by the server binary and integration
//! tests).
//!
//! A movie-discovery backend: a free-text query is refined, resolved to one
//! movie via the TMDb metadata provider, enriched with generated
//! summary/dialogue/similar-movie content, and served as an aggregated
//! response. The exports are organized by module:
//!
//! - [`ranking`] - candidate selection: the deterministic [`HeuristicRanker`]
//!   and the probabilistic [`AmplifiedRanker`]
//! - [`tmdb`] - movie metadata provider client
//! - [`lastfm`] - soundtrack provider client
//! - [`llm`] - OpenAI-backed refinement and content generation
//! - [`gateway`] - Axum HTTP surface
//! - [`config`] - environment-backed server configuration
//!
//! Mock providers are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod gateway;
pub mod lastfm;
pub mod llm;
pub mod ranking;
pub mod tmdb;

pub use config::{Config, ConfigError};
pub use gateway::{GatewayError, HandlerState, create_router_with_state};
#[cfg(any(test, feature = "mock"))]
pub use lastfm::MockSoundtrackProvider;
pub use lastfm::{LastfmClient, LastfmError, Soundtrack, SoundtrackProvider, Track};
#[cfg(any(test, feature = "mock"))]
pub use llm::MockQueryAssistant;
pub use llm::{Dialogue, LlmError, OpenAiClient, QueryAssistant, RefinedQuery};
pub use ranking::{AmplifiedRanker, Candidate, HeuristicRanker, Ranker, relevance_scores};
#[cfg(any(test, feature = "mock"))]
pub use tmdb::MockMovieProvider;
pub use tmdb::{
    CastMember, CrewMember, MovieDetails, MovieProvider, MovieSummary, TmdbClient, TmdbError,
};
