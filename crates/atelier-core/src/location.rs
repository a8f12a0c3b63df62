//! Exhibition location catalog
//!
//! Locations are not stored in the database: the studio's exhibition venues
//! are a short fixed list built once at startup and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display metadata for one exhibition location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationEntry {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Site-relative image path, may contain non-ASCII file names
    pub image_path: String,
}

impl LocationEntry {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        image_path: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            description: description.into(),
            image_path: image_path.into(),
        }
    }
}

/// Immutable slug -> location lookup table
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    entries: HashMap<String, LocationEntry>,
}

impl LocationCatalog {
    /// Empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// The studio's built-in exhibition venues
    pub fn builtin() -> Self {
        Self::from_entries([
            LocationEntry::new(
                "paris",
                "パリ第一回",
                "ATELIER ISSEI 初の海外展示。パリ・マレ地区のギャラリーで発表した新作シリーズ。",
                "/images/exhibitions/paris/パリ展示.jpg",
            ),
            LocationEntry::new(
                "tokyo",
                "東京・銀座展",
                "銀座のギャラリーで開催した個展。青を基調とした大型作品を中心に展示。",
                "/images/exhibitions/tokyo/銀座展示.jpg",
            ),
            LocationEntry::new(
                "kyoto",
                "京都・町家展",
                "京町家を会場に、空間と作品の対話をテーマにした展示。",
                "/images/exhibitions/kyoto/町家展示.png",
            ),
        ])
    }

    /// Build a catalog; later entries replace earlier ones with the same slug
    pub fn from_entries(entries: impl IntoIterator<Item = LocationEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.slug.clone(), entry))
            .collect();
        Self { entries }
    }

    /// Consume the catalog and layer `overrides` on top of it
    pub fn extended(mut self, overrides: impl IntoIterator<Item = LocationEntry>) -> Self {
        for entry in overrides {
            self.entries.insert(entry.slug.clone(), entry);
        }
        self
    }

    pub fn get(&self, slug: &str) -> Option<&LocationEntry> {
        self.entries.get(slug)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by slug
    pub fn entries(&self) -> Vec<&LocationEntry> {
        let mut entries: Vec<_> = self.entries.values().collect();
        entries.sort_by(|a, b| a.slug.cmp(&b.slug));
        entries
    }
}
