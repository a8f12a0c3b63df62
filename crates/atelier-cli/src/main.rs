use anyhow::Result;
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use atelier_cli::cli::{Cli, Commands};
use atelier_cli::commands;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `preview` output can be piped
    let env_filter = match cli.level_filter() {
        Some(level) => EnvFilter::default().add_directive(level.into()),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Serve(args) => commands::serve::execute(cli.config, args).await?,
        Commands::Preview {
            path,
            user_agent,
            host,
        } => commands::preview::execute(cli.config, path, user_agent, host).await?,
        Commands::Artworks(cmd) => commands::artworks::execute(cli.config, cmd).await?,
        Commands::Config(cmd) => commands::config::execute(cli.config, cmd).await?,
    }

    Ok(())
}
