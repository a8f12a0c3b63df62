use anyhow::{bail, Context, Result};
use atelier_config::ConfigLoader;
use atelier_core::{Artwork, ArtworkStore};
use atelier_web::services::init_state;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::cli::ArtworkCommands;

pub async fn execute(config_path: Option<PathBuf>, cmd: ArtworkCommands) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let state = init_state(config)?;
    let store = state.store.as_ref();

    match cmd {
        ArtworkCommands::Import { file } => {
            let imported = import_file(store, &file).await?;
            println!(
                "{} imported {} artwork(s) from {}",
                "Success:".green().bold(),
                imported,
                file.display()
            );
        }
        ArtworkCommands::List { format } => list(store, &format).await?,
    }

    Ok(())
}

async fn import_file(store: &dyn ArtworkStore, file: &Path) -> Result<usize> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    import_json(store, &contents).await
}

/// Upsert every artwork in a JSON array; ids must be positive
pub async fn import_json(store: &dyn ArtworkStore, json: &str) -> Result<usize> {
    let artworks: Vec<Artwork> =
        serde_json::from_str(json).context("Expected a JSON array of artworks")?;

    if let Some(bad) = artworks.iter().find(|a| a.id <= 0) {
        bail!("Artwork ids must be positive, got {}", bad.id);
    }

    let count = artworks.len();
    for artwork in artworks {
        debug!(id = artwork.id, title = %artwork.title, "Importing artwork");
        store.upsert_artwork(artwork).await?;
    }
    Ok(count)
}

async fn list(store: &dyn ArtworkStore, format: &str) -> Result<()> {
    let artworks = store.list_public_artworks().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&artworks)?);
        return Ok(());
    }

    if artworks.is_empty() {
        println!("{}", "No artworks".dimmed());
        return Ok(());
    }

    println!("{:>6}  {:<10}  {}", "ID".bold(), "STATUS".bold(), "TITLE".bold());
    for artwork in &artworks {
        println!(
            "{:>6}  {:<10}  {}",
            artwork.id,
            artwork.status.as_str(),
            artwork.title
        );
    }
    let total = store.count_artworks().await?;
    println!(
        "{}",
        format!("{} listed, {} in catalog", artworks.len(), total).dimmed()
    );

    Ok(())
}
