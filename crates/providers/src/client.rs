//! Model client: the single boundary to the model provider.
//!
//! The client is always constructible. Missing credentials or an unusable
//! HTTP stack are logged at startup and then surface on every call as a
//! `Generation::Fallback` carrying readable error text, so the rest of the
//! gateway keeps serving.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};
use vynce_config::AppConfig;
use vynce_core::error::ProviderError;
use vynce_core::provider::{Generation, GenerationRequest, ModelDescriptor, ModelProvider};
use vynce_core::query::{PageContext, truncate_chars};

use crate::gemini::GeminiProvider;

/// Namespace prefix some clients put in front of model names.
const MODEL_NAMESPACE_PREFIX: &str = "models/";

/// Per-field cap in the legacy context prompt.
const LEGACY_CONTEXT_CHARS: usize = 500;

/// Values used when the caller leaves a generation knob unset.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationDefaults {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl From<&AppConfig> for GenerationDefaults {
    fn from(config: &AppConfig) -> Self {
        Self {
            model: config.default_model.clone(),
            temperature: config.default_temperature,
            max_tokens: config.default_max_tokens,
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// Optional per-call overrides.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions<'a> {
    pub model: Option<&'a str>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// Strip a leading `models/` namespace from a model identifier.
pub fn normalize_model_name(model: &str) -> &str {
    model.strip_prefix(MODEL_NAMESPACE_PREFIX).unwrap_or(model)
}

/// A normalized name becomes one URL path segment, so only
/// `[A-Za-z0-9._-]` is allowed and `.`/`..` are refused.
pub fn is_valid_model_name(model: &str) -> bool {
    !model.is_empty()
        && model != "."
        && model != ".."
        && model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// The user-facing text for a failed call.
///
/// Configuration faults start with `Error:`; provider and transport faults
/// start with `Gemini API error:`.
pub fn fallback_text(reason: &ProviderError) -> String {
    match reason {
        ProviderError::NotConfigured(message) => format!("Error: {message}"),
        ProviderError::InvalidModel(_) => format!("Error: {reason}"),
        other => format!("Gemini API error: {other}"),
    }
}

/// Owns all interaction with the model provider.
pub struct ModelClient {
    provider: Option<Arc<dyn ModelProvider>>,
    defaults: GenerationDefaults,
}

impl ModelClient {
    /// Build the Gemini-backed client from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        info!("Initializing VynceAI model client with Gemini");
        let defaults = GenerationDefaults::from(config);

        match GeminiProvider::new(config.gemini.api_key.clone()) {
            Ok(provider) => Self::new(
                Arc::new(provider.with_base_url(&config.gemini.api_url)),
                defaults,
            ),
            Err(e) => {
                error!(error = %e, "Gemini client unavailable");
                Self::unavailable(defaults)
            }
        }
    }

    /// Wrap an existing provider.
    pub fn new(provider: Arc<dyn ModelProvider>, defaults: GenerationDefaults) -> Self {
        if provider.is_configured() {
            info!(provider = provider.name(), model = %defaults.model, "Model client initialized");
        } else {
            error!(provider = provider.name(), "API key not configured, model calls will return error text");
        }
        Self {
            provider: Some(provider),
            defaults,
        }
    }

    /// A client with no provider at all. Every call falls back.
    pub fn unavailable(defaults: GenerationDefaults) -> Self {
        Self {
            provider: None,
            defaults,
        }
    }

    pub fn defaults(&self) -> &GenerationDefaults {
        &self.defaults
    }

    /// Whether a provider is present and holds a credential.
    pub fn is_configured(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_configured())
    }

    /// The model identifier a request resolves to, before normalization.
    pub fn resolve_model(&self, model: Option<&str>) -> String {
        model
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(self.defaults.model.as_str())
            .to_string()
    }

    /// Generate text for `prompt` with the default knobs.
    pub async fn generate(&self, prompt: &str, model: Option<&str>) -> Generation {
        self.generate_with(
            prompt,
            GenerateOptions {
                model,
                ..Default::default()
            },
        )
        .await
    }

    /// Generate text for `prompt`. Never fails; faults become `Fallback`.
    pub async fn generate_with(&self, prompt: &str, options: GenerateOptions<'_>) -> Generation {
        let resolved = self.resolve_model(options.model);
        let request = GenerationRequest {
            prompt: prompt.to_string(),
            model: normalize_model_name(&resolved).to_string(),
            temperature: options.temperature.unwrap_or(self.defaults.temperature),
            max_tokens: options.max_tokens.unwrap_or(self.defaults.max_tokens),
        };

        info!(model = %request.model, "Generating response with Gemini");

        let result = if is_valid_model_name(&request.model) {
            self.call(request).await
        } else {
            Err(ProviderError::InvalidModel(request.model))
        };

        match result {
            Ok(text) => {
                info!(chars = text.chars().count(), "Gemini response received");
                Generation::Text(text)
            }
            Err(reason) => {
                let text = fallback_text(&reason);
                error!(error = %reason, "Generation failed, returning error text");
                Generation::Fallback { reason, text }
            }
        }
    }

    /// Legacy low-level path: augments the prompt with a short persona and
    /// up to three page-context lines before generating.
    ///
    /// The orchestrator's enriched builder is the canonical prompt builder;
    /// this remains for direct callers of the client.
    pub async fn generate_with_context(
        &self,
        prompt: &str,
        context: Option<&PageContext>,
        model: Option<&str>,
    ) -> Generation {
        let prompt = build_context_prompt(prompt, context);
        self.generate(&prompt, model).await
    }

    /// List the models callers may pick from.
    ///
    /// Empty when no credential is configured. No connectivity is attempted.
    pub async fn list_available_models(&self) -> Vec<ModelDescriptor> {
        let Some(provider) = self.provider.as_ref().filter(|p| p.is_configured()) else {
            debug!("No provider credential, model list is empty");
            return Vec::new();
        };

        match provider.list_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!(error = %e, "Failed to list models");
                Vec::new()
            }
        }
    }

    /// One attempt, bounded by the configured timeout.
    async fn call(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        let Some(provider) = self.provider.as_ref() else {
            return Err(ProviderError::NotConfigured(
                "Gemini client unavailable".into(),
            ));
        };
        if !provider.is_configured() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".into(),
            ));
        }

        let timeout = self.defaults.timeout;
        tokio::time::timeout(timeout, provider.generate(request))
            .await
            .map_err(|_| {
                ProviderError::Timeout(format!("no response after {}s", timeout.as_secs()))
            })?
    }
}

/// The legacy persona-plus-context prompt. Returns `prompt` unchanged when
/// there is no context.
fn build_context_prompt(prompt: &str, context: Option<&PageContext>) -> String {
    let Some(context) = context else {
        return prompt.to_string();
    };

    let mut parts = vec![
        "You are VynceAI, an intelligent AI-powered browser assistant. \
Answer questions about web pages concisely and always identify as \"VynceAI\" when asked your name."
            .to_string(),
    ];

    if let Some(url) = context.url() {
        parts.push(format!("\nCurrent page URL: {}", truncate_chars(url, LEGACY_CONTEXT_CHARS)));
    }
    if let Some(title) = context.title() {
        parts.push(format!("Page title: {}", truncate_chars(title, LEGACY_CONTEXT_CHARS)));
    }
    if let Some(selected) = context.selected_text() {
        parts.push(format!(
            "Selected text: {}",
            truncate_chars(selected, LEGACY_CONTEXT_CHARS)
        ));
    } else if let Some(content) = context.page_content() {
        parts.push(format!(
            "Page content: {}",
            truncate_chars(content, LEGACY_CONTEXT_CHARS)
        ));
    }

    parts.push(format!("\nUser question: {prompt}"));
    parts.push("\nVynceAI response:".to_string());
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every request and replies with a fixed result.
    struct RecordingProvider {
        configured: bool,
        reply: Result<String, ProviderError>,
        delay: Option<Duration>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl RecordingProvider {
        fn replying(text: &str) -> Self {
            Self {
                configured: true,
                reply: Ok(text.into()),
                delay: None,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: ProviderError) -> Self {
            Self {
                reply: Err(err),
                ..Self::replying("")
            }
        }

        fn last(&self) -> GenerationRequest {
            self.seen.lock().unwrap().last().cloned().expect("no calls")
        }

        fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ModelProvider for RecordingProvider {
        fn name(&self) -> &str {
            "recording"
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
            self.seen.lock().unwrap().push(request);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.reply.clone()
        }

        async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
            Ok(vec![ModelDescriptor::new("m1", "Model One", "recording")])
        }
    }

    fn client_with(provider: Arc<RecordingProvider>) -> ModelClient {
        ModelClient::new(provider, GenerationDefaults::default())
    }

    #[test]
    fn normalize_strips_namespace_prefix() {
        assert_eq!(normalize_model_name("models/foo"), "foo");
        assert_eq!(normalize_model_name("gemini-2.5-flash"), "gemini-2.5-flash");
        assert_eq!(normalize_model_name("my-models/foo"), "my-models/foo");
    }

    #[tokio::test]
    async fn generate_normalizes_model_name() {
        let provider = Arc::new(RecordingProvider::replying("ok"));
        let client = client_with(provider.clone());

        let result = client.generate("hi", Some("models/foo")).await;
        assert_eq!(result, Generation::Text("ok".into()));
        assert_eq!(provider.last().model, "foo");
    }

    #[test]
    fn model_name_charset() {
        assert!(is_valid_model_name("gemini-2.5-flash"));
        assert!(is_valid_model_name("gemini_flash.latest"));
        assert!(!is_valid_model_name("../x"));
        assert!(!is_valid_model_name("a?b"));
        assert!(!is_valid_model_name(".."));
        assert!(!is_valid_model_name("a/b"));
        assert!(!is_valid_model_name("gemini pro"));
    }

    #[tokio::test]
    async fn path_like_model_never_reaches_provider() {
        let provider = Arc::new(RecordingProvider::replying("never"));
        let client = client_with(provider.clone());

        for model in ["../x", "a?b", "models/../../admin/deleteEverything?x="] {
            let result = client.generate("hi", Some(model)).await;
            assert!(matches!(result.reason(), Some(ProviderError::InvalidModel(_))));
            assert!(result.text().starts_with("Error: invalid model name"));
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn generate_uses_defaults_when_unset() {
        let provider = Arc::new(RecordingProvider::replying("ok"));
        let client = client_with(provider.clone());

        client.generate("hi", None).await;
        let req = provider.last();
        assert_eq!(req.model, "gemini-2.5-flash");
        assert_eq!(req.max_tokens, 1000);
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(req.prompt, "hi");
    }

    #[tokio::test]
    async fn caller_overrides_win() {
        let provider = Arc::new(RecordingProvider::replying("ok"));
        let client = client_with(provider.clone());

        client
            .generate_with(
                "hi",
                GenerateOptions {
                    model: Some("gemini-2.5-pro"),
                    temperature: Some(0.1),
                    max_tokens: Some(42),
                },
            )
            .await;
        let req = provider.last();
        assert_eq!(req.model, "gemini-2.5-pro");
        assert_eq!(req.max_tokens, 42);
        assert!((req.temperature - 0.1).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn blank_model_falls_back_to_default() {
        let provider = Arc::new(RecordingProvider::replying("ok"));
        let client = client_with(provider.clone());
        assert_eq!(client.resolve_model(Some("  ")), "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn missing_key_falls_back_without_calling_provider() {
        let provider = Arc::new(RecordingProvider {
            configured: false,
            ..RecordingProvider::replying("never")
        });
        let client = client_with(provider.clone());

        let result = client.generate("hi", None).await;
        assert!(result.is_fallback());
        assert_eq!(result.text(), "Error: Gemini API key not configured");
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn unavailable_client_falls_back() {
        let client = ModelClient::unavailable(GenerationDefaults::default());
        let result = client.generate("hi", None).await;
        assert!(result.text().starts_with("Error:"));
        assert!(!client.is_configured());
        assert!(client.list_available_models().await.is_empty());
    }

    #[tokio::test]
    async fn provider_error_becomes_text() {
        let provider = Arc::new(RecordingProvider::failing(ProviderError::ApiError {
            status_code: 500,
            message: "backend exploded".into(),
        }));
        let client = client_with(provider);

        let result = client.generate("hi", None).await;
        assert!(result.is_fallback());
        assert!(result.text().starts_with("Gemini API error:"));
        assert!(result.text().contains("backend exploded"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let provider = Arc::new(RecordingProvider {
            delay: Some(Duration::from_secs(120)),
            ..RecordingProvider::replying("late")
        });
        let client = client_with(provider);

        let result = client.generate("hi", None).await;
        assert!(matches!(result.reason(), Some(ProviderError::Timeout(_))));
        assert!(result.text().contains("60s"));
    }

    #[tokio::test]
    async fn models_listed_only_when_configured() {
        let provider = Arc::new(RecordingProvider::replying("ok"));
        let client = client_with(provider);
        assert_eq!(client.list_available_models().await.len(), 1);

        let provider = Arc::new(RecordingProvider {
            configured: false,
            ..RecordingProvider::replying("ok")
        });
        let client = client_with(provider);
        assert!(client.list_available_models().await.is_empty());
    }

    #[tokio::test]
    async fn from_config_without_key_is_constructible() {
        let client = ModelClient::from_config(&AppConfig::default());
        assert!(!client.is_configured());
        let result = client.generate("hi", None).await;
        assert_eq!(result.text(), "Error: Gemini API key not configured");
    }

    #[test]
    fn legacy_prompt_without_context_is_unchanged() {
        assert_eq!(build_context_prompt("hello", None), "hello");
    }

    #[test]
    fn legacy_prompt_prefers_selection_and_truncates() {
        let context = PageContext {
            url: Some("https://x.com".into()),
            title: Some("X".into()),
            selected_text: Some("s".repeat(700)),
            page_content: Some("never shown".into()),
            snippet: None,
        };
        let prompt = build_context_prompt("What?", Some(&context));
        assert!(prompt.starts_with("You are VynceAI"));
        assert!(prompt.contains("Current page URL: https://x.com"));
        assert!(prompt.contains("Page title: X"));
        assert!(prompt.contains(&format!("Selected text: {}\n", "s".repeat(500))));
        assert!(!prompt.contains("never shown"));
        assert!(prompt.ends_with("User question: What?\n\nVynceAI response:"));
    }
}
