//! Provider capability: the abstraction over the hosted model service.
//!
//! A `ModelProvider` knows how to turn one prompt into one block of text.
//! The gateway targets a single provider family, but the orchestrator only
//! ever sees this trait, so tests swap in mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// A fully-resolved generation call handed to a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The final prompt text
    pub prompt: String,

    /// Provider-native model name (namespace prefix already stripped)
    pub model: String,

    /// Sampling temperature, passed through unvalidated
    pub temperature: f32,

    /// Maximum output tokens, passed through unvalidated
    pub max_tokens: u32,
}

/// A model the gateway can route to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub id: String,

    /// Display label
    pub name: String,

    /// Provider family tag (e.g. "gemini")
    pub provider: String,
}

impl ModelDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            provider: provider.into(),
        }
    }
}

/// Outcome of a model client call.
///
/// Provider faults never escape the model client as errors. They come back
/// as `Fallback`, which still carries user-presentable text.
#[derive(Debug, Clone, PartialEq)]
pub enum Generation {
    /// The model answered.
    Text(String),

    /// The call failed; `text` is the human-readable error shown to the user.
    Fallback { reason: ProviderError, text: String },
}

impl Generation {
    /// The text to show, whichever variant this is.
    pub fn text(&self) -> &str {
        match self {
            Generation::Text(text) => text,
            Generation::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Generation::Text(text) => text,
            Generation::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Generation::Fallback { .. })
    }

    /// The underlying fault, if the call failed.
    pub fn reason(&self) -> Option<&ProviderError> {
        match self {
            Generation::Text(_) => None,
            Generation::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// The provider capability.
///
/// Implementations perform a single attempt; retries, timeouts and error
/// flattening belong to the model client.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// A short name for this provider family (e.g. "gemini").
    fn name(&self) -> &str;

    /// Whether a credential is present. No connectivity check is made.
    fn is_configured(&self) -> bool;

    /// Send one prompt and return the generated text.
    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError>;

    /// The models this provider exposes.
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_text_accessors() {
        let ok = Generation::Text("hello".into());
        assert_eq!(ok.text(), "hello");
        assert!(!ok.is_fallback());
        assert!(ok.reason().is_none());

        let failed = Generation::Fallback {
            reason: ProviderError::Timeout("60s".into()),
            text: "Gemini API error: timed out".into(),
        };
        assert!(failed.is_fallback());
        assert_eq!(failed.reason(), Some(&ProviderError::Timeout("60s".into())));
        assert_eq!(failed.into_text(), "Gemini API error: timed out");
    }

    #[test]
    fn model_descriptor_serialization() {
        let model = ModelDescriptor::new("gemini-2.5-flash", "Gemini 2.5 Flash", "gemini");
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["id"], "gemini-2.5-flash");
        assert_eq!(json["name"], "Gemini 2.5 Flash");
        assert_eq!(json["provider"], "gemini");
    }
}
