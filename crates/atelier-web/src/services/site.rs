use crate::preview::{CrawlerClassifier, EntityResolver, HtmlTemplate, PreviewState};
use crate::{Result, WebError};
use atelier_config::AtelierConfig;
use atelier_core::{ArtworkStore, LocationCatalog, LocationEntry, StorageError};
use atelier_sqlite::{SqliteArtworkStore, SqliteConfig, SqlitePool};
use std::sync::Arc;

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ArtworkStore>,
    pub catalog: Arc<LocationCatalog>,
    pub config: Arc<AtelierConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn ArtworkStore>, config: AtelierConfig) -> Self {
        let catalog = Arc::new(location_catalog(&config));
        Self {
            store,
            catalog,
            config: Arc::new(config),
        }
    }

    /// State for the crawler preview middleware
    pub fn preview_state(&self) -> PreviewState {
        let site = Arc::new(self.config.site.clone());
        let preview = &self.config.preview;

        PreviewState::new(
            preview.enabled,
            CrawlerClassifier::new(&preview.extra_crawlers),
            EntityResolver::new(
                self.store.clone(),
                self.catalog.clone(),
                site.clone(),
                preview.description_limit,
            ),
            HtmlTemplate::for_static_dir(self.config.web.static_dir.as_deref(), preview.cache_template),
            site,
        )
    }
}

/// Built-in locations overlaid with `[[locations]]` from the config
pub fn location_catalog(config: &AtelierConfig) -> LocationCatalog {
    LocationCatalog::builtin().extended(config.locations.iter().map(|loc| {
        LocationEntry::new(
            loc.slug.clone(),
            loc.title.clone(),
            loc.description.clone(),
            loc.image_path.clone(),
        )
    }))
}

/// Open the SQLite store named in the config and build the app state
pub fn init_state(config: AtelierConfig) -> Result<AppState> {
    let sqlite_config = SqliteConfig::new(&config.storage.path)
        .with_wal_mode(config.storage.wal_mode)
        .with_busy_timeout(config.storage.busy_timeout_ms);

    let pool = SqlitePool::new(sqlite_config)
        .map_err(|e| WebError::Storage(StorageError::from(e)))?;

    Ok(AppState::new(Arc::new(SqliteArtworkStore::new(pool)), config))
}
