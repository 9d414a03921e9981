use axum::{Json, extract::Path, extract::State};
use tracing::{debug, info, instrument, warn};

use crate::lastfm::{Soundtrack, SoundtrackProvider};
use crate::llm::{QueryAssistant, RefinedQuery};
use crate::ranking::{AmplifiedRanker, Candidate, HeuristicRanker, Ranker};
use crate::tmdb::{MovieDetails, MovieProvider, MovieSummary};

use super::error::GatewayError;
use super::payload::{
    EnrichedMovie, MovieResponse, SearchInfo, SearchRequest, SimilarMovie, SoundtrackResponse,
};
use super::state::HandlerState;

/// Similarity assigned to LLM-suggested titles resolved through search.
const SUGGESTED_SIMILARITY: f64 = 0.85;
/// Below this many suggestions the list is topped up from provider
/// recommendations.
const MIN_SIMILAR_RESULTS: usize = 5;
/// How many LLM-suggested titles are resolved to provider records.
const MAX_SUGGESTED_TITLES: usize = 8;

#[instrument(skip(state, request), fields(use_quantum = request.use_quantum))]
pub async fn search_handler<M, S, A>(
    State(state): State<HandlerState<M, S, A>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<MovieResponse>, GatewayError>
where
    M: MovieProvider + Clone + Send + Sync + 'static,
    S: SoundtrackProvider + Clone + Send + Sync + 'static,
    A: QueryAssistant + Clone + Send + Sync + 'static,
{
    let refined = match state.assistant.refine_query(&request.query).await {
        Ok(refined) => refined,
        Err(e) => {
            warn!(error = %e, "query refinement unavailable, using raw query");
            RefinedQuery::passthrough(&request.query)
        }
    };

    info!(
        original = %request.query,
        refined = %refined.refined_query,
        intent = %refined.intent_type,
        year = ?refined.likely_year,
        "search"
    );

    let results = state.movies.search(&refined.refined_query).await?;
    if results.is_empty() {
        return Err(GatewayError::NoResults);
    }

    let exact = refined
        .likely_year
        .as_deref()
        .and_then(|year| match_by_title_and_year(&results, &refined.refined_query, year));

    let movie_id = match exact {
        Some(id) => {
            debug!(movie_id = id, "exact title+year match");
            id
        }
        None => {
            select_candidate(
                &state.assistant,
                &results,
                &refined.refined_query,
                &request.query,
                request.use_quantum,
            )
            .await
        }
    };

    let details = state.movies.details(movie_id).await?;
    let search_info = SearchInfo::from_search(
        &request.query,
        &refined.refined_query,
        &refined.intent_type,
    );

    let response = enrich(&state, movie_id, details, search_info).await;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn movie_handler<M, S, A>(
    State(state): State<HandlerState<M, S, A>>,
    Path(movie_id): Path<u64>,
) -> Result<Json<MovieResponse>, GatewayError>
where
    M: MovieProvider + Clone + Send + Sync + 'static,
    S: SoundtrackProvider + Clone + Send + Sync + 'static,
    A: QueryAssistant + Clone + Send + Sync + 'static,
{
    let details = state.movies.details(movie_id).await?;
    info!(movie_id, title = %details.title, "movie lookup by id");

    let response = enrich(&state, movie_id, details, SearchInfo::direct()).await;
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn soundtrack_handler<M, S, A>(
    State(state): State<HandlerState<M, S, A>>,
    Path(movie_id): Path<u64>,
) -> Result<Json<SoundtrackResponse>, GatewayError>
where
    M: MovieProvider + Clone + Send + Sync + 'static,
    S: SoundtrackProvider + Clone + Send + Sync + 'static,
    A: QueryAssistant + Clone + Send + Sync + 'static,
{
    let details = state.movies.details(movie_id).await?;
    let year = details.release_year().map(str::to_string);
    info!(title = %details.title, year = ?year, "fetching soundtrack");

    let from_lastfm = match state
        .soundtracks
        .movie_soundtrack(&details.title, year.as_deref())
        .await
    {
        Ok(soundtrack) if soundtrack.has_tracks() => Some(soundtrack),
        Ok(_) => {
            debug!("Last.fm returned no tracks");
            None
        }
        Err(e) => {
            warn!(error = %e, "Last.fm lookup failed");
            None
        }
    };

    let soundtrack = match from_lastfm {
        Some(soundtrack) => soundtrack,
        None => state
            .assistant
            .soundtrack_fallback(&details.title, year.as_deref())
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "soundtrack fallback unavailable");
                Soundtrack::default()
            }),
    };

    Ok(Json(SoundtrackResponse {
        title: details.title,
        year,
        soundtrack,
    }))
}

/// Picks one id out of a non-empty result list.
///
/// The amplified ranker handles `use_quantum` requests; otherwise the LLM
/// picks, falling back to the deterministic heuristic ranker when the
/// assistant is unavailable.
async fn select_candidate<A>(
    assistant: &A,
    results: &[MovieSummary],
    refined_query: &str,
    original_query: &str,
    use_quantum: bool,
) -> u64
where
    A: QueryAssistant,
{
    let candidates: Vec<Candidate> = results.iter().map(Candidate::from).collect();

    if use_quantum {
        return AmplifiedRanker
            .select(&candidates, refined_query)
            .unwrap_or(results[0].id);
    }

    match assistant.pick_best_match(results, original_query).await {
        Ok(Some(id)) => id,
        Ok(None) => results[0].id,
        Err(e) => {
            warn!(error = %e, "LLM match selection unavailable, using heuristic ranker");
            HeuristicRanker
                .select(&candidates, refined_query)
                .unwrap_or(results[0].id)
        }
    }
}

/// Case-insensitive exact title match with a matching four-digit release year.
fn match_by_title_and_year(results: &[MovieSummary], title: &str, year: &str) -> Option<u64> {
    let title = title.trim().to_lowercase();
    let year = year.trim();

    results
        .iter()
        .find(|movie| {
            movie.title.trim().to_lowercase() == title
                && movie.release_date.len() >= 4
                && &movie.release_date[..4] == year
        })
        .map(|movie| movie.id)
}

/// Runs summary, dialogue, and similar-movie generation concurrently.
async fn enrich<M, S, A>(
    state: &HandlerState<M, S, A>,
    movie_id: u64,
    details: MovieDetails,
    search_info: SearchInfo,
) -> MovieResponse
where
    M: MovieProvider + Clone + Send + Sync + 'static,
    S: SoundtrackProvider + Clone + Send + Sync + 'static,
    A: QueryAssistant + Clone + Send + Sync + 'static,
{
    let (summary, dialogues, similar_movies) = tokio::join!(
        state.assistant.summary(&details),
        state.assistant.dialogues(&details),
        collect_similar_movies(state, movie_id, &details),
    );

    let summary = summary.unwrap_or_else(|e| {
        warn!(error = %e, "summary generation unavailable, using provider overview");
        details.overview.clone()
    });
    let dialogues = dialogues.unwrap_or_else(|e| {
        warn!(error = %e, "dialogue generation unavailable");
        Vec::new()
    });

    MovieResponse {
        movie: EnrichedMovie {
            details,
            summary,
            dialogues,
            search_info,
        },
        similar_movies,
    }
}

/// Resolves LLM-suggested titles via search, then tops up from provider
/// recommendations when too few resolve. Best-effort throughout.
async fn collect_similar_movies<M, S, A>(
    state: &HandlerState<M, S, A>,
    movie_id: u64,
    details: &MovieDetails,
) -> Vec<SimilarMovie>
where
    M: MovieProvider + Clone + Send + Sync + 'static,
    S: SoundtrackProvider + Clone + Send + Sync + 'static,
    A: QueryAssistant + Clone + Send + Sync + 'static,
{
    let titles = state
        .assistant
        .similar_titles(details)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "similar-title suggestion unavailable");
            Vec::new()
        });

    let mut similar = Vec::new();
    for title in titles.iter().take(MAX_SUGGESTED_TITLES) {
        match state.movies.search(title).await {
            Ok(results) => {
                if let Some(hit) = results.into_iter().next() {
                    if similar.iter().all(|s: &SimilarMovie| s.id != hit.id) {
                        similar.push(SimilarMovie {
                            id: hit.id,
                            title: hit.title,
                            poster_path: hit.poster_path,
                            release_date: hit.release_date,
                            similarity_score: SUGGESTED_SIMILARITY,
                        });
                    }
                }
            }
            Err(e) => warn!(title = %title, error = %e, "similar-title search failed"),
        }
    }

    if similar.len() < MIN_SIMILAR_RESULTS {
        match state.movies.recommendations(movie_id).await {
            Ok(recommendations) => {
                for movie in recommendations {
                    if similar.iter().all(|s| s.id != movie.id) {
                        similar.push(SimilarMovie {
                            id: movie.id,
                            title: movie.title,
                            poster_path: movie.poster_path,
                            release_date: movie.release_date,
                            similarity_score: (movie.vote_average * 10.0).round() / 100.0,
                        });
                    }
                }
            }
            Err(e) => warn!(movie_id, error = %e, "recommendation top-up failed"),
        }
    }

    similar
}
