//! Query orchestration.
//!
//! Chooses between the plain and enriched prompt paths, composes the prompt,
//! calls the model client once, and shapes the result.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;
use vynce_core::error::{Error, Result};
use vynce_core::provider::ModelDescriptor;
use vynce_core::query::{PageContext, QueryRequest, QueryResponse};
use vynce_providers::ModelClient;

use crate::prompt::{PageTask, build_enriched_prompt, build_page_report_prompt};

/// Result of a summarize or analyze request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    pub response: String,
    pub model: String,
    pub url: Option<String>,
    pub title: Option<String>,
}

/// Routes queries to the right prompt path and shapes the reply.
pub struct QueryOrchestrator {
    client: Arc<ModelClient>,
}

impl QueryOrchestrator {
    pub fn new(client: Arc<ModelClient>) -> Self {
        Self { client }
    }

    /// Validate and answer a query on the plain or enriched path.
    ///
    /// Provider faults never surface here; they come back as response text.
    pub async fn process(&self, request: &QueryRequest) -> Result<QueryResponse> {
        request.validate()?;

        let span = info_span!(
            "query",
            request_id = %Uuid::new_v4(),
            enriched = request.is_enriched()
        );

        async {
            if request.is_enriched() {
                Ok(self.enriched(request).await)
            } else {
                Ok(self.plain(&request.prompt, request.model.as_deref()).await)
            }
        }
        .instrument(span)
        .await
    }

    /// Always take the plain path, ignoring any context or memory.
    pub async fn process_plain(&self, request: &QueryRequest) -> Result<QueryResponse> {
        request.validate()?;

        let span = info_span!("query", request_id = %Uuid::new_v4(), enriched = false);
        Ok(self
            .plain(&request.prompt, request.model.as_deref())
            .instrument(span)
            .await)
    }

    pub async fn summarize_page(&self, request: &QueryRequest) -> Result<PageReport> {
        self.page_report(PageTask::Summarize, request).await
    }

    pub async fn analyze_page(&self, request: &QueryRequest) -> Result<PageReport> {
        self.page_report(PageTask::Analyze, request).await
    }

    pub async fn list_available_models(&self) -> Vec<ModelDescriptor> {
        self.client.list_available_models().await
    }

    async fn plain(&self, prompt: &str, model: Option<&str>) -> QueryResponse {
        let model = self.client.resolve_model(model);
        debug!(model = %model, "Plain path");

        let generation = self.client.generate(prompt, Some(&model)).await;
        QueryResponse::plain(generation.into_text(), model)
    }

    async fn enriched(&self, request: &QueryRequest) -> QueryResponse {
        let model = self.client.resolve_model(request.model.as_deref());
        let memory = request.memory_items();
        info!(
            model = %model,
            has_context = request.context.is_some(),
            memory_items = memory.len(),
            "Enriched path"
        );

        let prompt = build_enriched_prompt(&request.prompt, request.context.as_ref(), memory);
        let generation = self.client.generate(&prompt, Some(&model)).await;
        QueryResponse::enriched(generation, model)
    }

    async fn page_report(&self, task: PageTask, request: &QueryRequest) -> Result<PageReport> {
        request.validate()?;
        let (context, content) = require_page_content(request)?;

        let span = info_span!("page_report", request_id = %Uuid::new_v4(), task = task.name());

        async {
            let prompt = build_page_report_prompt(task, context, content);
            let response = self.plain(&prompt, request.model.as_deref()).await;

            Ok(PageReport {
                model: response.model().unwrap_or_default().to_string(),
                response: response.into_response(),
                url: context.url().map(str::to_string),
                title: context.title().map(str::to_string),
            })
        }
        .instrument(span)
        .await
    }
}

fn require_page_content(request: &QueryRequest) -> Result<(&PageContext, &str)> {
    let context = request
        .context
        .as_ref()
        .ok_or_else(|| Error::Validation("context with pageContent is required".into()))?;
    let content = context
        .page_content()
        .ok_or_else(|| Error::Validation("context.pageContent is required".into()))?;
    Ok((context, content))
}
