//! Entity resolution: route reference -> preview metadata
//!
//! Lookups never fail across this boundary. Store errors are logged and
//! reported as "not found" so the caller falls back to the plain page.

use super::route::EntityReference;
use atelier_config::SiteConfig;
use atelier_core::{ArtworkStore, LocationCatalog};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMimeType {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageMimeType {
    /// Guess from the URL's extension; anything unrecognized is served as JPEG
    pub fn from_url(url: &str) -> Self {
        let path = strip_query(url).to_ascii_lowercase();
        if path.ends_with(".png") {
            ImageMimeType::Png
        } else if path.ends_with(".gif") {
            ImageMimeType::Gif
        } else if path.ends_with(".webp") {
            ImageMimeType::Webp
        } else {
            ImageMimeType::Jpeg
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
            ImageMimeType::Gif => "image/gif",
            ImageMimeType::Webp => "image/webp",
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values written into the preview tags. Derived per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewMetadata {
    /// Full page title, `<site name> - <entity title>`
    pub title: String,
    pub description: String,
    /// Absolute, ends in a recognized image extension
    pub image_url: String,
    /// Absolute URL of the page being previewed
    pub page_url: String,
    pub image_mime_type: ImageMimeType,
    pub image_alt: String,
}

pub struct EntityResolver {
    store: Arc<dyn ArtworkStore>,
    catalog: Arc<LocationCatalog>,
    site: Arc<SiteConfig>,
    description_limit: usize,
}

impl EntityResolver {
    pub fn new(
        store: Arc<dyn ArtworkStore>,
        catalog: Arc<LocationCatalog>,
        site: Arc<SiteConfig>,
        description_limit: usize,
    ) -> Self {
        Self {
            store,
            catalog,
            site,
            description_limit,
        }
    }

    /// `base_url` is the request origin without trailing slash; `path` is the
    /// request path used to build `og:url`.
    pub async fn resolve(
        &self,
        reference: &EntityReference,
        base_url: &str,
        path: &str,
    ) -> Option<PreviewMetadata> {
        let page_url = format!("{}{}", base_url, strip_query(path));

        match reference {
            EntityReference::Artwork { id } => self.resolve_artwork(*id, base_url, page_url).await,
            EntityReference::Location { slug } => self.resolve_location(slug, base_url, page_url),
        }
    }

    async fn resolve_artwork(
        &self,
        id: i64,
        base_url: &str,
        page_url: String,
    ) -> Option<PreviewMetadata> {
        let artwork = match self.store.find_artwork_by_id(id).await {
            Ok(Some(artwork)) => artwork,
            Ok(None) => {
                debug!(id, "Artwork not found");
                return None;
            }
            Err(e) => {
                warn!(id, error = %e, "Artwork lookup failed");
                return None;
            }
        };

        if !artwork.status.is_public() {
            debug!(id, status = %artwork.status, "Artwork is not public");
            return None;
        }

        let image = artwork
            .image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(self.site.default_image.as_str());
        let image_url = ensure_image_extension(&absolute_url(image, base_url));

        Some(self.metadata(&artwork.title, &artwork.description, image_url, page_url))
    }

    fn resolve_location(
        &self,
        slug: &str,
        base_url: &str,
        page_url: String,
    ) -> Option<PreviewMetadata> {
        let Some(location) = self.catalog.get(slug) else {
            debug!(slug, "Location not in catalog");
            return None;
        };

        let image_url = if is_absolute(&location.image_path) {
            absolute_url(&location.image_path, base_url)
        } else {
            absolute_url(&encode_path_segments(&location.image_path), base_url)
        };
        let image_url = ensure_image_extension(&image_url);

        Some(self.metadata(&location.title, &location.description, image_url, page_url))
    }

    fn metadata(
        &self,
        entity_title: &str,
        description: &str,
        image_url: String,
        page_url: String,
    ) -> PreviewMetadata {
        let entity_title = entity_title.trim();
        let (title, image_alt) = if entity_title.is_empty() {
            (self.site.name.clone(), self.site.image_alt_fallback.clone())
        } else {
            (
                format!("{} - {}", self.site.name, entity_title),
                entity_title.to_string(),
            )
        };

        let description = match truncate_description(description, self.description_limit) {
            Some(description) => description,
            None => self.site.default_description.clone(),
        };

        PreviewMetadata {
            title,
            description,
            image_mime_type: ImageMimeType::from_url(&image_url),
            image_url,
            page_url,
            image_alt,
        }
    }
}

/// Collapse whitespace and cut to `limit` characters, appending `...` when
/// cut. `None` for blank input.
pub fn truncate_description(text: &str, limit: usize) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    if collapsed.chars().count() <= limit {
        return Some(collapsed);
    }
    let cut: String = collapsed.chars().take(limit).collect();
    Some(format!("{}...", cut.trim_end()))
}

fn is_absolute(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || url.starts_with("//")
}

/// Absolute URLs pass through; protocol-relative ones get `https:`;
/// site-relative paths are joined onto `base_url`.
pub fn absolute_url(url: &str, base_url: &str) -> String {
    if url.starts_with("//") {
        return format!("https:{url}");
    }
    if is_absolute(url) {
        return url.to_string();
    }
    if url.starts_with('/') {
        format!("{base_url}{url}")
    } else {
        format!("{base_url}/{url}")
    }
}

/// Percent-encode each `/`-separated segment, keeping the separators
pub fn encode_path_segments(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Append `.jpg` to the path part when it has no recognized image extension
pub fn ensure_image_extension(url: &str) -> String {
    let path = strip_query(url);
    let lower = path.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return url.to_string();
    }
    format!("{}.jpg{}", path, &url[path.len()..])
}

fn strip_query(url: &str) -> &str {
    url.find(['?', '#']).map_or(url, |i| &url[..i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use atelier_core::{Artwork, ArtworkStatus, LocationEntry, StorageError, StorageResult};
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        artworks: HashMap<i64, Artwork>,
        fail: bool,
    }

    #[async_trait]
    impl ArtworkStore for MemoryStore {
        async fn find_artwork_by_id(&self, id: i64) -> StorageResult<Option<Artwork>> {
            if self.fail {
                return Err(StorageError::Backend("database is locked".into()));
            }
            Ok(self.artworks.get(&id).cloned())
        }
        async fn list_public_artworks(&self) -> StorageResult<Vec<Artwork>> {
            Ok(self.artworks.values().cloned().collect())
        }
        async fn upsert_artwork(&self, artwork: Artwork) -> StorageResult<i64> {
            Ok(artwork.id)
        }
        async fn count_artworks(&self) -> StorageResult<u64> {
            Ok(self.artworks.len() as u64)
        }
        async fn ping(&self) -> StorageResult<()> {
            Ok(())
        }
    }

    fn resolver_with(artworks: Vec<Artwork>, fail: bool) -> EntityResolver {
        let store = MemoryStore {
            artworks: artworks.into_iter().map(|a| (a.id, a)).collect(),
            fail,
        };
        EntityResolver::new(
            Arc::new(store),
            Arc::new(LocationCatalog::builtin().extended([LocationEntry::new(
                "remote",
                "Remote",
                "",
                "https://cdn.example.com/remote",
            )])),
            Arc::new(SiteConfig::default()),
            150,
        )
    }

    const BASE: &str = "https://atelier.example";

    #[tokio::test]
    async fn test_resolve_artwork() {
        let resolver = resolver_with(
            vec![Artwork::new(42, "青い静寂")
                .with_description("深い青")
                .with_image_url("/artworks/42.jpg")],
            false,
        );

        let meta = resolver
            .resolve(&EntityReference::Artwork { id: 42 }, BASE, "/artwork/42?ref=x")
            .await
            .expect("metadata");

        assert_eq!(meta.title, "ATELIER ISSEI - 青い静寂");
        assert_eq!(meta.description, "深い青");
        assert_eq!(meta.image_url, "https://atelier.example/artworks/42.jpg");
        assert_eq!(meta.page_url, "https://atelier.example/artwork/42");
        assert_eq!(meta.image_mime_type, ImageMimeType::Jpeg);
        assert_eq!(meta.image_alt, "青い静寂");
    }

    #[tokio::test]
    async fn test_absolute_artwork_image_is_kept() {
        let resolver = resolver_with(
            vec![Artwork::new(1, "x").with_image_url("https://cdn.example.com/a/1.PNG")],
            false,
        );
        let meta = resolver
            .resolve(&EntityReference::Artwork { id: 1 }, BASE, "/artwork/1")
            .await
            .unwrap();
        assert_eq!(meta.image_url, "https://cdn.example.com/a/1.PNG");
        assert_eq!(meta.image_mime_type, ImageMimeType::Png);
    }

    #[tokio::test]
    async fn test_missing_image_uses_site_default() {
        let resolver = resolver_with(vec![Artwork::new(3, "x")], false);
        let meta = resolver
            .resolve(&EntityReference::Artwork { id: 3 }, BASE, "/artwork/3")
            .await
            .unwrap();
        assert_eq!(meta.image_url, "https://atelier.example/images/og-default.jpg");
    }

    #[tokio::test]
    async fn test_empty_description_uses_fallback() {
        let resolver = resolver_with(vec![Artwork::new(3, "x").with_description("  \n ")], false);
        let meta = resolver
            .resolve(&EntityReference::Artwork { id: 3 }, BASE, "/artwork/3")
            .await
            .unwrap();
        assert_eq!(meta.description, SiteConfig::default().default_description);
    }

    #[tokio::test]
    async fn test_empty_title_falls_back() {
        let resolver = resolver_with(vec![Artwork::new(3, " ")], false);
        let meta = resolver
            .resolve(&EntityReference::Artwork { id: 3 }, BASE, "/artwork/3")
            .await
            .unwrap();
        assert_eq!(meta.title, "ATELIER ISSEI");
        assert_eq!(meta.image_alt, "ATELIER ISSEI artwork");
    }

    #[tokio::test]
    async fn test_missing_draft_and_failing_lookups_are_none() {
        let resolver = resolver_with(
            vec![Artwork::new(5, "draft").with_status(ArtworkStatus::Draft)],
            false,
        );
        assert!(resolver
            .resolve(&EntityReference::Artwork { id: 999_999 }, BASE, "/artwork/999999")
            .await
            .is_none());
        assert!(resolver
            .resolve(&EntityReference::Artwork { id: 5 }, BASE, "/artwork/5")
            .await
            .is_none());

        let failing = resolver_with(vec![Artwork::new(1, "x")], true);
        assert!(failing
            .resolve(&EntityReference::Artwork { id: 1 }, BASE, "/artwork/1")
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_resolve_location_encodes_image_path() {
        let resolver = resolver_with(vec![], false);
        let meta = resolver
            .resolve(
                &EntityReference::Location {
                    slug: "paris".into(),
                },
                BASE,
                "/exhibition/location/paris",
            )
            .await
            .unwrap();

        assert_eq!(meta.title, "ATELIER ISSEI - パリ第一回");
        assert_eq!(
            meta.image_url,
            "https://atelier.example/images/exhibitions/paris/%E3%83%91%E3%83%AA%E5%B1%95%E7%A4%BA.jpg"
        );
        assert_eq!(meta.page_url, "https://atelier.example/exhibition/location/paris");
    }

    #[tokio::test]
    async fn test_unknown_location_is_none() {
        let resolver = resolver_with(vec![], false);
        assert!(resolver
            .resolve(
                &EntityReference::Location {
                    slug: "berlin".into()
                },
                BASE,
                "/exhibition/location/berlin"
            )
            .await
            .is_none());
    }

    #[tokio::test]
    async fn test_absolute_location_image_gets_extension() {
        let resolver = resolver_with(vec![], false);
        let meta = resolver
            .resolve(
                &EntityReference::Location {
                    slug: "remote".into(),
                },
                BASE,
                "/exhibition/location/remote",
            )
            .await
            .unwrap();
        assert_eq!(meta.image_url, "https://cdn.example.com/remote.jpg");
        assert_eq!(meta.description, SiteConfig::default().default_description);
    }

    #[test]
    fn test_truncate_description() {
        assert_eq!(truncate_description("", 10), None);
        assert_eq!(truncate_description("short", 10).as_deref(), Some("short"));
        assert_eq!(
            truncate_description("a  b\n\tc", 10).as_deref(),
            Some("a b c")
        );
        assert_eq!(
            truncate_description("あいうえおかきくけこさ", 10).as_deref(),
            Some("あいうえおかきくけこ...")
        );
        assert_eq!(
            truncate_description("hello world again", 6).as_deref(),
            Some("hello...")
        );
    }

    #[test]
    fn test_ensure_image_extension() {
        assert_eq!(ensure_image_extension("https://a/x.webp"), "https://a/x.webp");
        assert_eq!(ensure_image_extension("https://a/x"), "https://a/x.jpg");
        assert_eq!(ensure_image_extension("https://a/x?v=2"), "https://a/x.jpg?v=2");
        assert_eq!(ensure_image_extension("https://a/x.JPEG?v=2"), "https://a/x.JPEG?v=2");
    }

    #[test]
    fn test_absolute_url() {
        assert_eq!(absolute_url("/a.jpg", BASE), "https://atelier.example/a.jpg");
        assert_eq!(absolute_url("a.jpg", BASE), "https://atelier.example/a.jpg");
        assert_eq!(absolute_url("HTTP://x/a.jpg", BASE), "HTTP://x/a.jpg");
        assert_eq!(absolute_url("//cdn/a.jpg", BASE), "https://cdn/a.jpg");
    }

    #[test]
    fn test_encode_path_segments_keeps_slashes() {
        assert_eq!(
            encode_path_segments("/images/my photo/京.jpg"),
            "/images/my%20photo/%E4%BA%AC.jpg"
        );
    }
}
