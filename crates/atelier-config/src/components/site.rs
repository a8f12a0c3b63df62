//! Site identity configuration
//!
//! Names and URLs that appear in rendered link previews.

use serde::{Deserialize, Serialize};

/// Production hostname used when neither a configured URL nor request
/// headers provide an origin.
pub const DEFAULT_FALLBACK_URL: &str = "https://atelier-issei.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Prefix of every page title, e.g. `ATELIER ISSEI - 青い静寂`
    pub name: String,

    /// Public base URL; takes precedence over request headers when set
    pub public_url: Option<String>,

    /// Origin used when no header and no `public_url` is available
    pub fallback_url: String,

    /// Description used when an entity has none
    pub default_description: String,

    /// Image used when an artwork has no image of its own
    pub default_image: String,

    /// `twitter:image:alt` when the entity title is empty
    pub image_alt_fallback: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "ATELIER ISSEI".to_string(),
            public_url: None,
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
            default_description: "ATELIER ISSEI の作品と展示をご紹介します。".to_string(),
            default_image: "/images/og-default.jpg".to_string(),
            image_alt_fallback: "ATELIER ISSEI artwork".to_string(),
        }
    }
}

impl SiteConfig {
    /// `public_url` without a trailing slash, if configured and non-blank
    pub fn public_url(&self) -> Option<&str> {
        self.public_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/'))
    }

    pub fn fallback_url(&self) -> &str {
        self.fallback_url.trim_end_matches('/')
    }
}
