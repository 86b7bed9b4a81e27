//! `vynce doctor`: Diagnose configuration health.

use std::path::Path;

use vynce_config::AppConfig;

pub async fn run(config_path: Option<&Path>) -> vynce_core::Result<()> {
    println!("🩺 VynceAI Doctor — Configuration Diagnostics");
    println!("============================================\n");

    let mut issues = 0;

    let path = super::config_path(config_path);
    if path.exists() {
        println!("  ✅ Config file found: {}", path.display());
    } else {
        println!("  ⚠️  No config file at {} — using defaults (`vynce init` writes one)", path.display());
    }

    match AppConfig::load_with_env(&path) {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            println!("     Model: {}", config.default_model);
            println!("     Bind: {}:{}", config.gateway.host, config.gateway.port);

            if config.has_api_key() {
                println!("  ✅ Gemini API key configured");
            } else {
                println!("  ❌ No Gemini API key — set GEMINI_API_KEY or gemini.api_key");
                issues += 1;
            }
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
