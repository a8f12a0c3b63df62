//! Artwork entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Publication state of an artwork
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkStatus {
    /// Work in progress, hidden from visitors
    Draft,
    /// Listed and available
    #[default]
    Published,
    /// Listed, no longer available
    Sold,
    /// Kept for reference, still viewable by direct link
    Archived,
}

impl ArtworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtworkStatus::Draft => "draft",
            ArtworkStatus::Published => "published",
            ArtworkStatus::Sold => "sold",
            ArtworkStatus::Archived => "archived",
        }
    }

    /// Whether visitors (and link crawlers) may see this artwork
    pub fn is_public(&self) -> bool {
        !matches!(self, ArtworkStatus::Draft)
    }
}

impl fmt::Display for ArtworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtworkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(ArtworkStatus::Draft),
            "published" => Ok(ArtworkStatus::Published),
            "sold" => Ok(ArtworkStatus::Sold),
            "archived" => Ok(ArtworkStatus::Archived),
            other => Err(format!("unknown artwork status: {other}")),
        }
    }
}

/// A catalogued artwork
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Either an absolute URL or a site-relative path such as `/artworks/42.jpg`
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: ArtworkStatus,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Artwork {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            title: title.into(),
            description: String::new(),
            image_url: None,
            status: ArtworkStatus::Published,
            year: None,
            medium: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_status(mut self, status: ArtworkStatus) -> Self {
        self.status = status;
        self
    }
}
