//! `vynce init`: Write a default configuration file.

use std::path::Path;

use vynce_config::AppConfig;

pub async fn run(config_path: Option<&Path>, force: bool) -> vynce_core::Result<()> {
    let path = super::config_path(config_path);

    println!("⚙️  VynceAI — Setup");
    println!("==================\n");

    if path.exists() && !force {
        println!("  Config already exists: {}", path.display());
        println!("  Re-run with --force to overwrite.");
        return Ok(());
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, AppConfig::default_toml())?;
    println!("✅ Wrote {}", path.display());

    println!("\nNext steps:");
    println!("  1. Put your key in GEMINI_API_KEY (or gemini.api_key in the file)");
    println!("  2. Run `vynce doctor`");
    println!("  3. Run `vynce serve`");

    Ok(())
}
