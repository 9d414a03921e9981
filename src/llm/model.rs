use serde::{Deserialize, Serialize};

/// Interpreted search query plus intent metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinedQuery {
    #[serde(default)]
    pub refined_query: String,
    #[serde(default = "default_intent")]
    pub intent_type: String,
    #[serde(default)]
    pub likely_year: Option<String>,
    #[serde(default)]
    pub additional_info: String,
}

fn default_intent() -> String {
    "title".to_string()
}

impl RefinedQuery {
    /// Identity refinement: the raw query with title intent.
    pub fn passthrough(query: &str) -> Self {
        Self {
            refined_query: query.to_string(),
            intent_type: default_intent(),
            likely_year: None,
            additional_info: String::new(),
        }
    }

    /// Repairs model output: an empty refined query falls back to the
    /// original, and a literal `"null"` year becomes `None`.
    pub(crate) fn sanitized(mut self, original_query: &str) -> Self {
        if self.refined_query.trim().is_empty() {
            self.refined_query = original_query.to_string();
        }
        self.likely_year = self
            .likely_year
            .filter(|year| !year.trim().is_empty() && year.trim() != "null");
        self
    }
}

/// One generated movie dialogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialogue {
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub quote: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChoiceMessage {
    #[serde(default)]
    pub content: String,
}
