//! Shared fixtures for gateway route tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vynce_config::AppConfig;
use vynce_core::error::ProviderError;
use vynce_core::provider::{GenerationRequest, ModelDescriptor, ModelProvider};
use vynce_orchestrator::QueryOrchestrator;
use vynce_providers::{GenerationDefaults, ModelClient};

use crate::{AppState, build_router};

/// Lightweight mock provider for gateway tests.
pub struct MockProvider {
    response_text: String,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn replying(text: &str) -> Self {
        Self {
            response_text: text.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> String {
        self.prompts
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("provider was never called")
    }
}

#[async_trait]
impl ModelProvider for MockProvider {
    fn name(&self) -> &str {
        "gateway_mock"
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(request.prompt);
        Ok(self.response_text.clone())
    }

    async fn list_models(&self) -> Result<Vec<ModelDescriptor>, ProviderError> {
        Ok(vec![ModelDescriptor::new(
            "gemini-2.5-flash",
            "Gemini 2.5 Flash",
            "gateway_mock",
        )])
    }
}

/// A router over `provider`, plus a handle to inspect what it received.
pub fn app_with(provider: MockProvider) -> (axum::Router, Arc<MockProvider>) {
    let provider = Arc::new(provider);
    let client = ModelClient::new(provider.clone(), GenerationDefaults::default());
    let orchestrator = Arc::new(QueryOrchestrator::new(Arc::new(client)));
    let state = Arc::new(AppState::new(AppConfig::default(), orchestrator));
    (build_router(state), provider)
}

/// A router built from default configuration with no API key.
pub fn app_without_key() -> axum::Router {
    let state = Arc::new(AppState::from_config(AppConfig::default()));
    build_router(state)
}
