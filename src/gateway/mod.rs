//! HTTP gateway (Axum) for search, movie details, and soundtracks.
//!
//! This module is primarily used by the `cinesearch` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{movie_handler, search_handler, soundtrack_handler};
pub use state::HandlerState;

use crate::lastfm::SoundtrackProvider;
use crate::llm::QueryAssistant;
use crate::tmdb::MovieProvider;
use payload::StatusResponse;

pub fn create_router_with_state<M, S, A>(state: HandlerState<M, S, A>) -> Router
where
    M: MovieProvider + Clone + Send + Sync + 'static,
    S: SoundtrackProvider + Clone + Send + Sync + 'static,
    A: QueryAssistant + Clone + Send + Sync + 'static,
{
    // The frontend is served from a different origin; mirror the permissive
    // CORS policy the API has always had.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/status", get(status_handler))
        .route("/search", post(search_handler))
        .route("/api/movie/{movie_id}", get(movie_handler))
        .route("/api/movie/soundtrack/{movie_id}", get(soundtrack_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tracing::instrument]
pub async fn status_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        message: "cinesearch API running",
    })
}
