//! The frontend's `index.html`, used as the base document for previews

use crate::assets;
use crate::{Result, WebError};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// Read from disk, normally `<static_dir>/index.html`
    File(PathBuf),
    /// Compiled-in frontend build
    Embedded,
}

/// Loads the template, optionally keeping it in memory after the first read.
/// The file is treated as immutable for the life of the process.
pub struct HtmlTemplate {
    source: TemplateSource,
    cache: Option<OnceCell<Arc<str>>>,
}

impl HtmlTemplate {
    pub fn new(source: TemplateSource, cache: bool) -> Self {
        Self {
            source,
            cache: cache.then(OnceCell::new),
        }
    }

    /// `index.html` inside `static_dir`, or the embedded one
    pub fn for_static_dir(static_dir: Option<&str>, cache: bool) -> Self {
        let source = match static_dir {
            Some(dir) => TemplateSource::File(PathBuf::from(dir).join("index.html")),
            None => TemplateSource::Embedded,
        };
        Self::new(source, cache)
    }

    pub async fn load(&self) -> Result<Arc<str>> {
        match &self.cache {
            Some(cell) => cell.get_or_try_init(|| self.read()).await.cloned(),
            None => self.read().await,
        }
    }

    async fn read(&self) -> Result<Arc<str>> {
        match &self.source {
            TemplateSource::File(path) => {
                debug!(path = %path.display(), "Reading HTML template");
                let html = tokio::fs::read_to_string(path).await.map_err(|e| {
                    WebError::Template(format!("failed to read {}: {e}", path.display()))
                })?;
                Ok(Arc::from(html))
            }
            TemplateSource::Embedded => {
                let bytes = assets::embedded_file("index.html").ok_or_else(|| {
                    WebError::Template("embedded index.html is missing".to_string())
                })?;
                let html = String::from_utf8(bytes)
                    .map_err(|e| WebError::Template(format!("index.html is not UTF-8: {e}")))?;
                Ok(Arc::from(html))
            }
        }
    }
}
