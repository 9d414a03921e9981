use serde_json::json;

use super::model::{DetailResponse, MovieSummary, Video, extract_official_trailer};
use crate::ranking::Candidate;

fn video(kind: &str, site: &str, official: bool, key: &str) -> Video {
    serde_json::from_value(json!({
        "type": kind,
        "site": site,
        "official": official,
        "key": key,
    }))
    .expect("valid video json")
}

#[test]
fn test_extract_official_trailer_picks_first_official_youtube_trailer() {
    let videos = vec![
        video("Teaser", "YouTube", true, "teaser"),
        video("Trailer", "Vimeo", true, "vimeo"),
        video("Trailer", "YouTube", false, "unofficial"),
        video("Trailer", "YouTube", true, "abc123"),
    ];

    assert_eq!(
        extract_official_trailer(&videos),
        Some("https://www.youtube.com/watch?v=abc123".to_string())
    );
}

#[test]
fn test_extract_official_trailer_none_when_absent() {
    assert_eq!(extract_official_trailer(&[]), None);

    let videos = vec![video("Featurette", "YouTube", true, "x")];
    assert_eq!(extract_official_trailer(&videos), None);
}

#[test]
fn test_detail_response_shapes_movie_details() {
    let raw: DetailResponse = serde_json::from_value(json!({
        "id": 603,
        "title": "The Matrix",
        "overview": "A hacker discovers reality is simulated",
        "release_date": "1999-03-30",
        "runtime": 136,
        "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}],
        "vote_average": 8.2,
        "budget": 63000000u64,
        "revenue": 463517383u64,
        "credits": {
            "cast": [
                {"name": "Keanu Reeves", "character": "Neo", "profile_path": "/neo.jpg"},
                {"name": "Carrie-Anne Moss", "character": "Trinity", "profile_path": null}
            ],
            "crew": [
                {"name": "Lana Wachowski", "job": "Director", "profile_path": null},
                {"name": "Bill Pope", "job": "Director of Photography", "profile_path": null}
            ]
        },
        "keywords": {"keywords": [{"id": 1, "name": "cyberpunk"}]},
        "videos": {"results": [
            {"type": "Trailer", "site": "YouTube", "official": true, "key": "m8e-FF8MsqU"}
        ]}
    }))
    .expect("valid detail json");

    let details = raw.into_details();

    assert_eq!(details.id, 603);
    assert_eq!(details.genres, vec!["Action", "Science Fiction"]);
    assert_eq!(details.cast.len(), 2);
    assert_eq!(details.cast[0].character, "Neo");
    // Non-featured crew jobs are dropped.
    assert_eq!(details.crew.len(), 1);
    assert_eq!(details.crew[0].job, "Director");
    assert_eq!(details.keywords, vec!["cyberpunk"]);
    assert_eq!(
        details.trailer_url.as_deref(),
        Some("https://www.youtube.com/watch?v=m8e-FF8MsqU")
    );
    assert_eq!(details.release_year(), Some("1999"));
}

#[test]
fn test_detail_response_tolerates_missing_optional_fields() {
    let raw: DetailResponse =
        serde_json::from_value(json!({"id": 1, "title": "Bare"})).expect("minimal detail json");

    let details = raw.into_details();
    assert_eq!(details.title, "Bare");
    assert!(details.cast.is_empty());
    assert!(details.keywords.is_empty());
    assert_eq!(details.trailer_url, None);
    assert_eq!(details.release_year(), None);
}

#[test]
fn test_movie_summary_defaults_and_candidate_conversion() {
    let summary: MovieSummary =
        serde_json::from_value(json!({"id": 5, "title": "Alien"})).expect("minimal summary json");

    assert_eq!(summary.overview, "");
    assert_eq!(summary.popularity, 0.0);

    let candidate = Candidate::from(&summary);
    assert_eq!(candidate.id, 5);
    assert_eq!(candidate.title, "Alien");
    assert_eq!(candidate.overview, "");
    assert_eq!(candidate.popularity, 0.0);
}
