//! Shared test helpers for orchestrator tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vynce_core::error::ProviderError;
use vynce_core::provider::{GenerationRequest, ModelDescriptor, ModelProvider};
use vynce_providers::{GenerationDefaults, ModelClient};

/// A mock provider that records every prompt it receives and replies with
/// a scripted result.
pub struct RecordingProvider {
    configured: bool,
    reply: Result<String, ProviderError>,
    prompts: Mutex<Vec<GenerationRequest>>,
}

impl RecordingProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            configured: true,
            reply: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: ProviderError) -> Self {
        Self {
            reply: Err(err),
            ..Self::replying("")
        }
    }

    /// A provider that has no credential.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::replying("")
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// The last request sent. Panics if nothing was sent.
    pub fn last(&self) -> GenerationRequest {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("provider was never called")
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
        self.prompts.lock().unwrap().push(request);
        self.reply.clone()
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        Ok(vec![ModelDescriptor::new(
            "gemini-2.5-flash",
            "Gemini 2.5 Flash",
            "recording",
        )])
    }
}

/// A model client over `provider` with the stock defaults.
pub fn client_over(provider: Arc<RecordingProvider>) -> Arc<ModelClient> {
    Arc::new(ModelClient::new(provider, GenerationDefaults::default()))
}
