//! Social preview configuration
//!
//! Controls the crawler-facing HTML rewriting and the exhibition location
//! entries it can render.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Disable to always serve the plain single-page app
    pub enabled: bool,

    /// Keep the HTML template in memory after the first read
    pub cache_template: bool,

    /// Maximum description length in characters
    pub description_limit: usize,

    /// User-agent substrings treated as crawlers in addition to the built-in list
    pub extra_crawlers: Vec<String>,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_template: false,
            description_limit: 150,
            extra_crawlers: Vec::new(),
        }
    }
}

/// One `[[locations]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image_path: String,
}
