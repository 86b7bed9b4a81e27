//! Query request and response records.
//!
//! These are request-scoped values: the extension sends a prompt together
//! with whatever page context and conversation memory it holds, and gets back
//! a single response record. Nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::provider::Generation;

/// Metadata and excerpts from the page the user is browsing.
///
/// Accepts both the extension's camelCase keys and snake_case aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, alias = "selected_text", skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,

    #[serde(default, alias = "page_content", skip_serializing_if = "Option::is_none")]
    pub page_content: Option<String>,

    /// A short extract chosen by the extension; preferred over `page_content`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl PageContext {
    /// The URL, treating an empty string as absent.
    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn selected_text(&self) -> Option<&str> {
        non_empty(&self.selected_text)
    }

    pub fn page_content(&self) -> Option<&str> {
        non_empty(&self.page_content)
    }

    pub fn snippet(&self) -> Option<&str> {
        non_empty(&self.snippet)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// One prior exchange between the user and the assistant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryItem {
    /// The prior user turn
    pub user: String,

    /// The prior assistant turn
    pub bot: String,

    /// Opaque client timestamp (string or epoch number); carried, never read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Value>,
}

impl MemoryItem {
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
            timestamp: None,
        }
    }
}

/// A natural-language request from the extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub prompt: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<PageContext>,

    /// Prior exchanges, oldest first. Order is preserved as given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Vec<MemoryItem>>,

    /// Model identifier; the configured default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl QueryRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            context: None,
            memory: None,
            model: None,
        }
    }

    pub fn with_context(mut self, context: PageContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_memory(mut self, memory: Vec<MemoryItem>) -> Self {
        self.memory = Some(memory);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Memory items, or an empty slice when none were sent.
    pub fn memory_items(&self) -> &[MemoryItem] {
        self.memory.as_deref().unwrap_or(&[])
    }

    /// Whether this request needs the enriched prompt path.
    ///
    /// A supplied context object counts even if its fields are blank;
    /// memory counts only when it holds at least one item.
    pub fn is_enriched(&self) -> bool {
        self.context.is_some() || !self.memory_items().is_empty()
    }

    /// Reject requests the pipeline cannot act on.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.is_empty() {
            return Err(Error::Validation("prompt must not be empty".into()));
        }
        Ok(())
    }
}

/// The normalized reply returned to the extension.
///
/// `tokens` is always derived from `response`; there is no setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    response: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    tokens: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
}

impl QueryResponse {
    /// Plain-path shape: text and model only.
    pub fn plain(response: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            model: Some(model.into()),
            tokens: None,
            success: None,
        }
    }

    /// Enriched-path shape: adds a word-count estimate and a success flag
    /// derived from whether the model client fell back.
    pub fn enriched(generation: Generation, model: impl Into<String>) -> Self {
        let success = !generation.is_fallback();
        let response = generation.into_text();
        Self {
            tokens: Some(estimate_tokens(&response)),
            response,
            model: Some(model.into()),
            success: Some(success),
        }
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn tokens(&self) -> Option<usize> {
        self.tokens
    }

    pub fn success(&self) -> Option<bool> {
        self.success
    }

    pub fn into_response(self) -> String {
        self.response
    }
}

/// Rough token estimate: whitespace-separated word count.
pub fn estimate_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// The first `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
