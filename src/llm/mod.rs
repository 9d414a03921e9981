//! OpenAI-backed query refinement and content generation.
//!
//! Every method on [`QueryAssistant`] is best-effort: the gateway treats a
//! failure as "use the fallback" (raw query, heuristic ranker, provider
//! overview), never as a request-fatal error. Parse failures on model output
//! degrade inside the client itself; only transport-level problems surface
//! as [`LlmError`].

pub mod error;
pub mod model;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use error::LlmError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockQueryAssistant;
pub use model::{Dialogue, RefinedQuery};

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::lastfm::{Soundtrack, Track};
use crate::tmdb::{MovieDetails, MovieSummary};
use model::ChatResponse;

/// Default chat-completions endpoint.
pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default model when none is configured.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";

/// Candidates offered to the model when picking a best match.
const MAX_PICK_CANDIDATES: usize = 10;

/// LLM assistance required by the gateway.
#[async_trait]
pub trait QueryAssistant: Send + Sync {
    /// Interprets a free-text query into a refined query plus intent metadata.
    async fn refine_query(&self, query: &str) -> Result<RefinedQuery, LlmError>;

    /// Picks the best-matching candidate id, or `None` when `candidates` is
    /// empty.
    async fn pick_best_match(
        &self,
        candidates: &[MovieSummary],
        query: &str,
    ) -> Result<Option<u64>, LlmError>;

    /// Short editorial summary for a movie.
    async fn summary(&self, details: &MovieDetails) -> Result<String, LlmError>;

    /// Memorable dialogues attributed to characters.
    async fn dialogues(&self, details: &MovieDetails) -> Result<Vec<Dialogue>, LlmError>;

    /// Titles of movies a fan of this one would enjoy, best first.
    async fn similar_titles(&self, details: &MovieDetails) -> Result<Vec<String>, LlmError>;

    /// Generated soundtrack listing, used when Last.fm comes up empty.
    async fn soundtrack_fallback(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Soundtrack, LlmError>;
}

/// Chat-completions client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    chat_url: String,
}

impl OpenAiClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            http,
            api_key,
            model: model.into(),
            chat_url: OPENAI_CHAT_URL.to_string(),
        }
    }

    /// Overrides the chat endpoint (integration tests against a local stub).
    pub fn with_chat_url(mut self, chat_url: impl Into<String>) -> Self {
        self.chat_url = chat_url.into();
        self
    }

    async fn chat(
        &self,
        system: &str,
        user: String,
        max_tokens: u32,
        json_mode: bool,
    ) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let mut payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "max_tokens": max_tokens,
        });
        if json_mode {
            payload["response_format"] = json!({"type": "json_object"});
        }

        let response: ChatResponse = self
            .http
            .post(&self.chat_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl QueryAssistant for OpenAiClient {
    async fn refine_query(&self, query: &str) -> Result<RefinedQuery, LlmError> {
        let prompt = format!(
            "A user submitted the following movie search query: \"{query}\"\n\n\
             The user might be searching by exact or misspelled title, naming an \
             actor or character, describing the plot, or quoting dialogue.\n\n\
             Analyze the query and respond strictly in this JSON format:\n\
             {{\n\
               \"refined_query\": \"corrected and complete query or title\",\n\
               \"intent_type\": \"title | actor | character | plot | dialogue | mixed\",\n\
               \"likely_year\": \"YYYY or null\",\n\
               \"additional_info\": \"key info extracted from the query\"\n\
             }}"
        );

        debug!(query, "refining search query");
        let content = self
            .chat(
                "You are a movie expert assistant helping to interpret user search queries.",
                prompt,
                300,
                true,
            )
            .await?;

        match serde_json::from_str::<RefinedQuery>(&content) {
            Ok(refined) => Ok(refined.sanitized(query)),
            Err(e) => {
                warn!(error = %e, "failed to parse refined query, passing through");
                Ok(RefinedQuery::passthrough(query))
            }
        }
    }

    async fn pick_best_match(
        &self,
        candidates: &[MovieSummary],
        query: &str,
    ) -> Result<Option<u64>, LlmError> {
        if candidates.is_empty() {
            return Ok(None);
        }

        let shortlist = &candidates[..candidates.len().min(MAX_PICK_CANDIDATES)];
        let options = shortlist
            .iter()
            .enumerate()
            .map(|(idx, movie)| {
                format!(
                    "Movie {}:\nTitle: {}\nRelease Date: {}\nOverview: {}",
                    idx + 1,
                    movie.title,
                    movie.release_date,
                    movie.overview
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = format!(
            "User search query: \"{query}\"\n\n\
             Choose the best matching movie, considering spelling variations, \
             character names, famous quotes, and indirect references.\n\n\
             {options}\n\n\
             Return ONLY the number (1-{}) of the best match.",
            shortlist.len()
        );

        let content = self
            .chat(
                "You are a helpful assistant that selects the best movie match from a list.",
                prompt,
                50,
                false,
            )
            .await?;

        let picked = extract_first_number(&content)
            .filter(|n| (1..=shortlist.len()).contains(n))
            .map(|n| shortlist[n - 1].id)
            // Unparseable answer: the provider already sorted by relevance.
            .unwrap_or(candidates[0].id);

        Ok(Some(picked))
    }

    async fn summary(&self, details: &MovieDetails) -> Result<String, LlmError> {
        let prompt = format!(
            "Write a concise, engaging 2-3 sentence summary for the following \
             film. Include tone, theme, and hook, readable for casual movie fans.\n\n\
             {}",
            movie_info(details)
        );

        self.chat(
            "You are a film critic who writes compelling movie summaries.",
            prompt,
            200,
            false,
        )
        .await
    }

    async fn dialogues(&self, details: &MovieDetails) -> Result<Vec<Dialogue>, LlmError> {
        let prompt = format!(
            "Generate 5 memorable and realistic dialogues from the movie below, \
             mixing emotional, humorous, or dramatic tones depending on genre.\n\n\
             Respond in JSON:\n\
             {{\"dialogues\": [{{\"character\": \"Name\", \"quote\": \"Line\", \
             \"context\": \"Scene description\"}}]}}\n\n\
             {}",
            movie_info(details)
        );

        debug!(title = %details.title, "generating dialogues");
        let content = self
            .chat(
                "You are a movie expert who specializes in memorable film dialogues.",
                prompt,
                800,
                true,
            )
            .await?;

        Ok(parse_dialogues(&content).unwrap_or_else(|| {
            warn!(title = %details.title, "failed to parse dialogues");
            Vec::new()
        }))
    }

    async fn similar_titles(&self, details: &MovieDetails) -> Result<Vec<String>, LlmError> {
        let prompt = format!(
            "Based on the following movie, suggest 8 movies that its fans would \
             enjoy, in order of relevance. List sequels, remakes, and same-franchise \
             movies first, then movies with similar themes, tone, or style.\n\n\
             Return ONLY the movie titles as a JSON array.\n\n\
             {}",
            movie_info(details)
        );

        debug!(title = %details.title, "suggesting similar movies");
        let content = self
            .chat(
                "You are a film recommendation expert with vast knowledge of movies.",
                prompt,
                300,
                true,
            )
            .await?;

        let own_title = details.title.trim().to_lowercase();
        Ok(parse_string_list(&content)
            .unwrap_or_else(|| {
                warn!(title = %details.title, "failed to parse similar titles");
                Vec::new()
            })
            .into_iter()
            .filter(|title| title.trim().to_lowercase() != own_title)
            .collect())
    }

    async fn soundtrack_fallback(
        &self,
        title: &str,
        year: Option<&str>,
    ) -> Result<Soundtrack, LlmError> {
        let prompt = format!(
            "List the most iconic tracks (with artist or composer names) from the \
             official soundtrack of the movie \"{title}\" ({}).\n\n\
             Respond in JSON:\n\
             {{\"source\": \"openai\", \"album\": \"...\", \"artist\": \"...\", \
             \"tracks\": [{{\"name\": \"...\", \"artist\": \"...\", \"note\": \"...\"}}]}}",
            year.unwrap_or("unknown")
        );

        let content = self
            .chat(
                "You are a soundtrack expert who outputs JSON.",
                prompt,
                500,
                true,
            )
            .await?;

        Ok(serde_json::from_str::<Soundtrack>(&content).unwrap_or_else(|e| {
            warn!(title, error = %e, "failed to parse generated soundtrack");
            Soundtrack {
                source: Some("openai".to_string()),
                tracks: Vec::<Track>::new(),
                ..Soundtrack::default()
            }
        }))
    }
}

fn movie_info(details: &MovieDetails) -> String {
    let director = details
        .crew
        .iter()
        .find(|member| member.job == "Director")
        .map(|member| member.name.as_str())
        .unwrap_or("Unknown");

    format!(
        "Title: {}\nOverview: {}\nGenres: {}\nRelease Date: {}\nDirector: {}",
        details.title,
        details.overview,
        details.genres.join(", "),
        details.release_date,
        director
    )
}

/// First run of ASCII digits in `text`, parsed.
pub(crate) fn extract_first_number(text: &str) -> Option<usize> {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Accepts either a bare JSON array of dialogues or an object wrapping one.
pub(crate) fn parse_dialogues(content: &str) -> Option<Vec<Dialogue>> {
    let list = extract_array(content)?;
    serde_json::from_value(list).ok()
}

/// Accepts either a bare JSON array of strings or an object wrapping one.
pub(crate) fn parse_string_list(content: &str) -> Option<Vec<String>> {
    let list = extract_array(content)?;
    serde_json::from_value(list).ok()
}

fn extract_array(content: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(content).ok()? {
        Value::Array(items) => Some(Value::Array(items)),
        Value::Object(map) => map.into_iter().map(|(_, value)| value).find(Value::is_array),
        _ => None,
    }
}
