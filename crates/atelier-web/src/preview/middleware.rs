//! Crawler preview middleware
//!
//! Per request the outcome is either PASSTHROUGH (the next handler serves the
//! normal single-page app) or OVERRIDE (a 200 `text/html` response with the
//! preview tags rewritten). Every failure is a PASSTHROUGH: the worst case is
//! the page a browser would get anyway.

use super::base_url::request_base_url;
use super::crawler::CrawlerClassifier;
use super::resolver::EntityResolver;
use super::rewrite::rewrite_detailed;
use super::route::match_route;
use super::template::HtmlTemplate;
use atelier_config::SiteConfig;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Why a request was handed to the next handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughReason {
    Disabled,
    Method,
    NoRoute,
    NotCrawler,
    NotFound,
    TemplateUnavailable,
}

impl fmt::Display for PassthroughReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            PassthroughReason::Disabled => "preview disabled",
            PassthroughReason::Method => "method not GET/HEAD",
            PassthroughReason::NoRoute => "not a detail route",
            PassthroughReason::NotCrawler => "not a crawler",
            PassthroughReason::NotFound => "entity not found",
            PassthroughReason::TemplateUnavailable => "template unavailable",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewDecision {
    Passthrough(PassthroughReason),
    Override {
        html: String,
        /// Preview tags absent from the template
        missing_tags: Vec<&'static str>,
    },
}

/// Everything the middleware needs, shared read-only across requests
#[derive(Clone)]
pub struct PreviewState {
    inner: Arc<PreviewInner>,
}

struct PreviewInner {
    enabled: bool,
    classifier: CrawlerClassifier,
    resolver: EntityResolver,
    template: HtmlTemplate,
    site: Arc<SiteConfig>,
}

impl PreviewState {
    pub fn new(
        enabled: bool,
        classifier: CrawlerClassifier,
        resolver: EntityResolver,
        template: HtmlTemplate,
        site: Arc<SiteConfig>,
    ) -> Self {
        Self {
            inner: Arc::new(PreviewInner {
                enabled,
                classifier,
                resolver,
                template,
                site,
            }),
        }
    }

    /// Decide how to answer a request; never fails
    pub async fn decide(&self, method: &Method, path: &str, headers: &HeaderMap) -> PreviewDecision {
        let inner = &self.inner;

        if !inner.enabled {
            return PreviewDecision::Passthrough(PassthroughReason::Disabled);
        }
        if *method != Method::GET && *method != Method::HEAD {
            return PreviewDecision::Passthrough(PassthroughReason::Method);
        }

        let Some(reference) = match_route(path) else {
            return PreviewDecision::Passthrough(PassthroughReason::NoRoute);
        };

        let user_agent = headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !inner.classifier.is_crawler(user_agent) {
            debug!(%reference, "Browser request, serving app");
            return PreviewDecision::Passthrough(PassthroughReason::NotCrawler);
        }

        let base_url = request_base_url(headers, &inner.site);
        let Some(meta) = inner.resolver.resolve(&reference, &base_url, path).await else {
            debug!(%reference, "No preview metadata");
            return PreviewDecision::Passthrough(PassthroughReason::NotFound);
        };

        let template = match inner.template.load().await {
            Ok(template) => template,
            Err(e) => {
                warn!(%reference, error = %e, "Preview template unavailable");
                return PreviewDecision::Passthrough(PassthroughReason::TemplateUnavailable);
            }
        };

        let outcome = rewrite_detailed(&template, &meta);
        if !outcome.missing.is_empty() {
            debug!(missing = ?outcome.missing, "Template lacks some preview tags");
        }
        info!(%reference, user_agent, "Serving crawler preview");

        PreviewDecision::Override {
            html: outcome.html,
            missing_tags: outcome.missing,
        }
    }
}

/// axum middleware; install with `axum::middleware::from_fn_with_state`
pub async fn preview_middleware(
    State(state): State<PreviewState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    // Body is not Sync; only the parts are borrowed across the await
    let (parts, body) = request.into_parts();
    let decision = state.decide(&parts.method, &path, &parts.headers).await;

    match decision {
        PreviewDecision::Override { html, .. } => html_response(html),
        PreviewDecision::Passthrough(_) => next.run(Request::from_parts(parts, body)).await,
    }
}

fn html_response(html: String) -> Response {
    let mut response = Response::new(Body::from(html));
    *response.status_mut() = StatusCode::OK;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    );
    response
}
