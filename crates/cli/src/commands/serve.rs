//! `vynce serve`: Start the HTTP API server.

use std::path::Path;

pub async fn run(
    config_path: Option<&Path>,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> vynce_core::Result<()> {
    let mut config = super::load_config(config_path)?;

    if let Some(host) = host_override {
        config.gateway.host = host;
    }
    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🚀 VynceAI Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Model: {}", config.default_model);
    println!(
        "   Gemini key: {}",
        if config.has_api_key() { "configured" } else { "missing" }
    );

    vynce_gateway::start(config).await?;

    Ok(())
}
