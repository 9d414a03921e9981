//! End-to-end flow through the public router with mock providers.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use cinesearch::{
    Candidate, HandlerState, HeuristicRanker, MockMovieProvider, MockQueryAssistant,
    MockSoundtrackProvider, MovieDetails, MovieSummary, Ranker, create_router_with_state,
};

fn catalog() -> Vec<MovieSummary> {
    vec![
        MovieSummary {
            id: 1,
            title: "The Matrix".to_string(),
            overview: "A hacker discovers reality is simulated".to_string(),
            popularity: 80.0,
            poster_path: Some("/matrix.jpg".to_string()),
            release_date: "1999-03-30".to_string(),
            vote_average: 8.2,
        },
        MovieSummary {
            id: 2,
            title: "Matrix Reloaded".to_string(),
            overview: "Neo fights machines".to_string(),
            popularity: 40.0,
            poster_path: None,
            release_date: "2003-05-15".to_string(),
            vote_average: 7.0,
        },
    ]
}

fn matrix_details() -> MovieDetails {
    MovieDetails {
        id: 1,
        title: "The Matrix".to_string(),
        poster_path: Some("/matrix.jpg".to_string()),
        backdrop_path: None,
        overview: "A hacker discovers reality is simulated".to_string(),
        release_date: "1999-03-30".to_string(),
        runtime: Some(136),
        genres: vec!["Action".to_string(), "Science Fiction".to_string()],
        vote_average: 8.2,
        cast: Vec::new(),
        crew: Vec::new(),
        budget: 63_000_000,
        revenue: 463_517_383,
        keywords: vec!["cyberpunk".to_string()],
        trailer_url: Some("https://www.youtube.com/watch?v=m8e-FF8MsqU".to_string()),
    }
}

async fn response_json(
    router: axum::Router,
    request: Request<Body>,
) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("infallible service");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn search_resolves_enriches_and_aggregates() {
    let movies = MockMovieProvider::new()
        .with_search_results(catalog())
        .with_details(matrix_details());
    let assistant = MockQueryAssistant::new()
        .with_best_match(1)
        .with_summary("A hacker learns the truth about his world.")
        .with_similar(vec!["Matrix Reloaded".to_string()]);

    let router = create_router_with_state(HandlerState::new(
        movies,
        MockSoundtrackProvider::new(),
        assistant,
    ));

    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"query": "matrix hacker"}).to_string(),
        ))
        .expect("valid request");

    let (status, body) = response_json(router, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["movie"]["id"], 1);
    assert_eq!(body["movie"]["title"], "The Matrix");
    assert_eq!(
        body["movie"]["summary"],
        "A hacker learns the truth about his world."
    );
    assert_eq!(
        body["movie"]["trailer_url"],
        "https://www.youtube.com/watch?v=m8e-FF8MsqU"
    );
    assert_eq!(body["similar_movies"][0]["id"], 2);
    assert_eq!(body["similar_movies"][0]["similarity_score"], 0.85);
}

#[tokio::test]
async fn heuristic_selection_agrees_with_gateway_fallback() {
    // The ranker the gateway falls back to is exposed directly; the Matrix
    // example from the scoring contract must hold through the public API.
    let candidates: Vec<Candidate> = catalog().iter().map(Candidate::from).collect();
    assert_eq!(
        HeuristicRanker.select(&candidates, "matrix hacker"),
        Some(1)
    );

    let movies = MockMovieProvider::new()
        .with_search_results(catalog())
        .with_details(matrix_details());

    let router = create_router_with_state(HandlerState::new(
        movies,
        MockSoundtrackProvider::new(),
        MockQueryAssistant::failing(),
    ));

    let request = Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"query": "matrix hacker"}).to_string(),
        ))
        .expect("valid request");

    let (status, body) = response_json(router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["movie"]["id"], 1);
}
