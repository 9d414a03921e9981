//! Wire types for the TMDb v3 API and the shaped [`MovieDetails`] record.

use serde::{Deserialize, Serialize};

use crate::ranking::Candidate;

/// One row of a TMDb search or recommendation result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
}

impl From<&MovieSummary> for Candidate {
    fn from(summary: &MovieSummary) -> Self {
        Candidate {
            id: summary.id,
            title: summary.title.clone(),
            overview: summary.overview.clone(),
            popularity: summary.popularity,
        }
    }
}

/// Shaped movie details served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    pub release_date: String,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub vote_average: f64,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
    pub budget: u64,
    pub revenue: u64,
    pub keywords: Vec<String>,
    pub trailer_url: Option<String>,
}

impl MovieDetails {
    /// Four-digit release year, when the release date carries one.
    pub fn release_year(&self) -> Option<&str> {
        (self.release_date.len() >= 4).then(|| &self.release_date[..4])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrewMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Crew jobs worth surfacing in the response.
const FEATURED_CREW_JOBS: [&str; 4] = ["Director", "Producer", "Screenplay", "Writer"];

/// Cast list is truncated to the top billing.
const MAX_CAST: usize = 10;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DetailResponse {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub credits: Credits,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub keywords: KeywordList,
    #[serde(default)]
    pub videos: VideoList,
}

impl DetailResponse {
    pub(crate) fn into_details(self) -> MovieDetails {
        let trailer_url = extract_official_trailer(&self.videos.results);

        MovieDetails {
            id: self.id,
            title: self.title,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            overview: self.overview,
            release_date: self.release_date,
            runtime: self.runtime,
            genres: self.genres.into_iter().map(|genre| genre.name).collect(),
            vote_average: self.vote_average,
            cast: self.credits.cast.into_iter().take(MAX_CAST).collect(),
            crew: self
                .credits
                .crew
                .into_iter()
                .filter(|member| FEATURED_CREW_JOBS.contains(&member.job.as_str()))
                .collect(),
            budget: self.budget,
            revenue: self.revenue,
            keywords: self
                .keywords
                .keywords
                .into_iter()
                .map(|keyword| keyword.name)
                .collect(),
            trailer_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Genre {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct KeywordList {
    #[serde(default)]
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Keyword {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Video {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

/// YouTube URL of the first official trailer, if any.
pub(crate) fn extract_official_trailer(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|video| video.kind == "Trailer" && video.site == "YouTube" && video.official)
        .map(|video| format!("https://www.youtube.com/watch?v={}", video.key))
}
