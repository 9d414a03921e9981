//! Canned query assistant for tests.

use async_trait::async_trait;

use super::error::LlmError;
use super::model::{Dialogue, RefinedQuery};
use super::QueryAssistant;
use crate::lastfm::Soundtrack;
use crate::tmdb::{MovieDetails, MovieSummary};

/// [`QueryAssistant`] with per-method fixtures. `failing()` makes every
/// method error, exercising the gateway's fallback paths.
#[derive(Debug, Clone, Default)]
pub struct MockQueryAssistant {
    refined: Option<RefinedQuery>,
    best_match: Option<u64>,
    summary: Option<String>,
    dialogues: Vec<Dialogue>,
    similar: Vec<String>,
    soundtrack: Option<Soundtrack>,
    fail: bool,
}

impl MockQueryAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_refined(mut self, refined: RefinedQuery) -> Self {
        self.refined = Some(refined);
        self
    }

    pub fn with_best_match(mut self, id: u64) -> Self {
        self.best_match = Some(id);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_dialogues(mut self, dialogues: Vec<Dialogue>) -> Self {
        self.dialogues = dialogues;
        self
    }

    pub fn with_similar(mut self, titles: Vec<String>) -> Self {
        self.similar = titles;
        self
    }

    pub fn with_soundtrack(mut self, soundtrack: Soundtrack) -> Self {
        self.soundtrack = Some(soundtrack);
        self
    }

    fn check(&self) -> Result<(), LlmError> {
        if self.fail {
            Err(LlmError::MissingApiKey)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl QueryAssistant for MockQueryAssistant {
    async fn refine_query(&self, query: &str) -> Result<RefinedQuery, LlmError> {
        self.check()?;
        Ok(self
            .refined
            .clone()
            .unwrap_or_else(|| RefinedQuery::passthrough(query)))
    }

    async fn pick_best_match(
        &self,
        candidates: &[MovieSummary],
        _query: &str,
    ) -> Result<Option<u64>, LlmError> {
        self.check()?;
        if candidates.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.best_match.unwrap_or(candidates[0].id)))
    }

    async fn summary(&self, details: &MovieDetails) -> Result<String, LlmError> {
        self.check()?;
        Ok(self
            .summary
            .clone()
            .unwrap_or_else(|| format!("A summary of {}", details.title)))
    }

    async fn dialogues(&self, _details: &MovieDetails) -> Result<Vec<Dialogue>, LlmError> {
        self.check()?;
        Ok(self.dialogues.clone())
    }

    async fn similar_titles(&self, _details: &MovieDetails) -> Result<Vec<String>, LlmError> {
        self.check()?;
        Ok(self.similar.clone())
    }

    async fn soundtrack_fallback(
        &self,
        title: &str,
        _year: Option<&str>,
    ) -> Result<Soundtrack, LlmError> {
        self.check()?;
        Ok(self.soundtrack.clone().unwrap_or_else(|| Soundtrack {
            source: Some("openai".to_string()),
            album: format!("Soundtrack of {title}"),
            ..Soundtrack::default()
        }))
    }
}
