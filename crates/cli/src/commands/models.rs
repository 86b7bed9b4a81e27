//! `vynce models`: List the models the gateway offers.

use std::path::Path;

use vynce_providers::ModelClient;

pub async fn run(config_path: Option<&Path>) -> vynce_core::Result<()> {
    let config = super::load_config(config_path)?;
    let client = ModelClient::from_config(&config);

    let models = client.list_available_models().await;
    if models.is_empty() {
        println!("No models available — set GEMINI_API_KEY or gemini.api_key in config.toml");
        return Ok(());
    }

    println!("{:<24} {:<24} PROVIDER", "ID", "NAME");
    for model in &models {
        let marker = if model.id == config.default_model { " (default)" } else { "" };
        println!("{:<24} {:<24} {}{marker}", model.id, model.name, model.provider);
    }

    Ok(())
}
