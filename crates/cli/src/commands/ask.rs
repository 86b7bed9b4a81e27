//! `vynce ask`: One-shot question through the plain path.

use std::path::Path;
use std::sync::Arc;

use vynce_core::QueryRequest;
use vynce_orchestrator::QueryOrchestrator;
use vynce_providers::ModelClient;

pub async fn run(
    config_path: Option<&Path>,
    prompt: String,
    model: Option<String>,
) -> vynce_core::Result<()> {
    let config = super::load_config(config_path)?;
    let client = Arc::new(ModelClient::from_config(&config));
    let orchestrator = QueryOrchestrator::new(client);

    let mut request = QueryRequest::new(prompt);
    if let Some(model) = model {
        request = request.with_model(model);
    }

    let response = orchestrator.process_plain(&request).await?;
    println!("{}", response.response());

    Ok(())
}
