use anyhow::{Context, Result};
use atelier_config::{AtelierConfig, ConfigLoader};
use std::path::PathBuf;

use crate::cli::ConfigCommands;

pub async fn execute(config_path: Option<PathBuf>, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { format } => {
            let config = ConfigLoader::load(config_path)?;
            println!("{}", render(&config, &format)?);
        }
        ConfigCommands::Path => match ConfigLoader::default_config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("(no config directory on this platform)"),
        },
    }
    Ok(())
}

/// Effective configuration as TOML (default) or JSON
pub fn render(config: &AtelierConfig, format: &str) -> Result<String> {
    match format {
        "json" => serde_json::to_string_pretty(config).context("Failed to serialize config"),
        _ => Ok(config.to_toml()?),
    }
}
