use anyhow::{Context, Result};
use atelier_config::ConfigLoader;
use atelier_web::preview::PreviewDecision;
use atelier_web::services::init_state;
use axum::http::{header, HeaderMap, HeaderValue, Method};
use colored::Colorize;
use std::path::PathBuf;

/// Run the preview decision for `path` as if `user_agent` had requested it
pub async fn execute(
    config_path: Option<PathBuf>,
    path: String,
    user_agent: String,
    host: String,
) -> Result<()> {
    let config = ConfigLoader::load(config_path)?;
    let state = init_state(config)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_str(&user_agent).context("User-Agent is not a valid header value")?,
    );
    headers.insert(
        header::HOST,
        HeaderValue::from_str(&host).context("Host is not a valid header value")?,
    );

    match state.preview_state().decide(&Method::GET, &path, &headers).await {
        PreviewDecision::Override { html, missing_tags } => {
            if !missing_tags.is_empty() {
                eprintln!(
                    "{} template has no {}",
                    "Warning:".yellow().bold(),
                    missing_tags.join(", ")
                );
            }
            println!("{html}");
        }
        PreviewDecision::Passthrough(reason) => {
            eprintln!(
                "{} {} ({})",
                "Passthrough:".cyan().bold(),
                path,
                reason.to_string().dimmed()
            );
        }
    }

    Ok(())
}
