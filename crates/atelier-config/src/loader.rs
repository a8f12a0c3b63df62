//! Configuration loading
//!
//! Precedence: defaults < file < environment < CLI flags. CLI flags are
//! applied by the caller through [`ConfigOverrides`].

use crate::config::{AtelierConfig, ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variables consulted by [`ConfigLoader::apply_env`]
pub mod env_vars {
    pub const PUBLIC_URL: &str = "ATELIER_PUBLIC_URL";
    pub const DB_PATH: &str = "ATELIER_DB_PATH";
    pub const STATIC_DIR: &str = "ATELIER_STATIC_DIR";
    pub const PORT: &str = "ATELIER_PORT";
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub static_dir: Option<String>,
    pub db_path: Option<PathBuf>,
    pub public_url: Option<String>,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// `~/.config/atelier/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("atelier").join("config.toml"))
    }

    /// Load from `path` (or the default location when it exists), then apply
    /// the environment and validate.
    pub fn load(path: Option<PathBuf>) -> ConfigResult<AtelierConfig> {
        Self::load_with_overrides(path, ConfigOverrides::default())
    }

    pub fn load_with_overrides(
        path: Option<PathBuf>,
        overrides: ConfigOverrides,
    ) -> ConfigResult<AtelierConfig> {
        let explicit = path.is_some();
        let path = path.or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if explicit || path.exists() => Self::from_file(&path)?,
            _ => {
                debug!("No config file found, using defaults");
                AtelierConfig::default()
            }
        };

        Self::apply_env(&mut config);
        Self::apply_overrides(&mut config, overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: &Path) -> ConfigResult<AtelierConfig> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> ConfigResult<AtelierConfig> {
        Ok(toml::from_str(contents)?)
    }

    pub fn apply_env(config: &mut AtelierConfig) {
        if let Ok(url) = std::env::var(env_vars::PUBLIC_URL) {
            config.site.public_url = Some(url);
        }
        if let Ok(path) = std::env::var(env_vars::DB_PATH) {
            config.storage.path = PathBuf::from(path);
        }
        if let Ok(dir) = std::env::var(env_vars::STATIC_DIR) {
            config.web.static_dir = Some(dir);
        }
        if let Ok(port) = std::env::var(env_vars::PORT) {
            if let Ok(port) = port.parse() {
                config.web.port = port;
            }
        }
    }

    pub fn apply_overrides(config: &mut AtelierConfig, overrides: ConfigOverrides) {
        if let Some(host) = overrides.host {
            config.web.host = host;
        }
        if let Some(port) = overrides.port {
            config.web.port = port;
        }
        if let Some(dir) = overrides.static_dir {
            config.web.static_dir = Some(dir);
        }
        if let Some(path) = overrides.db_path {
            config.storage.path = path;
        }
        if let Some(url) = overrides.public_url {
            config.site.public_url = Some(url);
        }
    }
}
