//! Social preview rendering for link crawlers
//!
//! Detail pages (`/artwork/{id}`, `/exhibition/location/{slug}`) are client
//! rendered, so crawlers that do not run JavaScript would only see the
//! generic tags of `index.html`. For those crawlers the middleware serves the
//! same document with the preview tags filled in for the requested entity.

pub mod base_url;
pub mod crawler;
pub mod middleware;
pub mod resolver;
pub mod rewrite;
pub mod route;
pub mod template;

pub use crawler::{is_crawler, CrawlerClassifier, KNOWN_CRAWLERS};
pub use middleware::{preview_middleware, PassthroughReason, PreviewDecision, PreviewState};
pub use resolver::{EntityResolver, ImageMimeType, PreviewMetadata};
pub use rewrite::{escape_html, rewrite, rewrite_detailed, RewriteOutcome};
pub use route::{match_route, EntityReference};
pub use template::{HtmlTemplate, TemplateSource};
