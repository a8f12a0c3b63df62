use anyhow::Result;
use atelier_config::{ConfigLoader, ConfigOverrides};
use std::path::PathBuf;
use tracing::info;

use crate::cli::ServeArgs;

pub fn overrides(args: ServeArgs) -> ConfigOverrides {
    ConfigOverrides {
        host: args.host,
        port: args.port,
        static_dir: args.static_dir,
        db_path: args.db_path,
        public_url: args.public_url,
    }
}

pub async fn execute(config_path: Option<PathBuf>, args: ServeArgs) -> Result<()> {
    let config = ConfigLoader::load_with_overrides(config_path, overrides(args))?;

    info!(
        db = %config.storage.path.display(),
        public_url = config.site.public_url().unwrap_or("(from request)"),
        preview = config.preview.enabled,
        "Starting atelier"
    );

    atelier_web::start_server(config).await?;
    Ok(())
}
