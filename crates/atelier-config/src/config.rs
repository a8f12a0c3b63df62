use crate::components::{LocationConfig, PreviewConfig, SiteConfig, StorageConfig, WebConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration, mirrors `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtelierConfig {
    pub site: SiteConfig,
    pub web: WebConfig,
    pub storage: StorageConfig,
    pub preview: PreviewConfig,
    /// Extra or replacement exhibition locations
    pub locations: Vec<LocationConfig>,
}

impl AtelierConfig {
    /// Reject values the server cannot run with
    pub fn validate(&self) -> ConfigResult<()> {
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Invalid("site.name must not be empty".into()));
        }

        if let Some(url) = self.site.public_url() {
            if !is_http_url(url) {
                return Err(ConfigError::Invalid(format!(
                    "site.public_url must be an http(s) URL, got {url:?}"
                )));
            }
        }

        if !is_http_url(self.site.fallback_url()) {
            return Err(ConfigError::Invalid(format!(
                "site.fallback_url must be an http(s) URL, got {:?}",
                self.site.fallback_url
            )));
        }

        if self.site.default_image.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "site.default_image must not be empty".into(),
            ));
        }

        if self.preview.description_limit == 0 {
            return Err(ConfigError::Invalid(
                "preview.description_limit must be greater than zero".into(),
            ));
        }

        for location in &self.locations {
            if location.slug.is_empty() || location.slug.contains('/') {
                return Err(ConfigError::Invalid(format!(
                    "location slug {:?} must be non-empty and contain no '/'",
                    location.slug
                )));
            }
        }

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    matches!(rest, Some(host) if !host.is_empty())
}
