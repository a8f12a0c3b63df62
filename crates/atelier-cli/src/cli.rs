use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Log level options for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    Off,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages (default)
    Info,
    /// Debug messages
    Debug,
    /// Trace-level messages (most verbose)
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Parser)]
#[command(name = "atelier")]
#[command(about = "atelier - portfolio server with link previews for social crawlers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (off, error, warn, info, debug, trace)
    /// If not specified, RUST_LOG is honoured, otherwise 'info'
    #[arg(short = 'l', long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose logging (shortcut for --log-level=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (defaults to ~/.config/atelier/config.toml)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Effective log level; `None` defers to `RUST_LOG`
    pub fn level_filter(&self) -> Option<LevelFilter> {
        match (self.log_level, self.verbose) {
            (Some(level), _) => Some(level.into()),
            (None, true) => Some(LevelFilter::DEBUG),
            (None, false) => None,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server
    Serve(ServeArgs),

    /// Render the page a crawler would receive for a path
    ///
    /// Prints the rewritten HTML to stdout, or the reason the request would
    /// have been passed through to the regular app.
    Preview {
        /// Request path, e.g. /artwork/42
        path: String,

        /// User-Agent to classify
        #[arg(short = 'u', long, default_value = "facebookexternalhit/1.1")]
        user_agent: String,

        /// Host header to send when no public URL is configured
        #[arg(long, default_value = "localhost")]
        host: String,
    },

    /// Manage the artwork catalog
    #[command(subcommand)]
    Artworks(ArtworkCommands),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Serve the frontend from this directory instead of the embedded build
    #[arg(long)]
    pub static_dir: Option<String>,

    /// SQLite database path
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    /// Canonical public origin used in preview URLs
    #[arg(long)]
    pub public_url: Option<String>,
}

#[derive(Subcommand)]
pub enum ArtworkCommands {
    /// Import artworks from a JSON array, replacing entries with the same id
    Import {
        /// JSON file to read
        file: PathBuf,
    },

    /// List artworks visible to visitors
    List {
        /// Output format (table, json)
        #[arg(short = 'f', long, default_value = "table")]
        format: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current effective configuration
    Show {
        /// Output format (toml, json)
        #[arg(short = 'f', long, default_value = "toml")]
        format: String,
    },

    /// Print the default config file location
    Path,
}
