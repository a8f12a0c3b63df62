//! Public origin of the current request
//!
//! Forwarded headers are client-controlled. The result only ends up in
//! descriptive preview tags, never in redirects or auth decisions.

use atelier_config::SiteConfig;
use axum::http::{header, HeaderMap};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Resolve the base URL (no trailing slash).
///
/// Order: configured `public_url`, then `X-Forwarded-Proto`/`X-Forwarded-Host`,
/// then `Host` over plain http, then the configured fallback.
pub fn request_base_url(headers: &HeaderMap, site: &SiteConfig) -> String {
    if let Some(url) = site.public_url() {
        return url.to_string();
    }

    let host = first_header_value(headers, X_FORWARDED_HOST)
        .or_else(|| first_header_value(headers, header::HOST.as_str()));

    match host {
        Some(host) => {
            let proto = first_header_value(headers, X_FORWARDED_PROTO)
                .filter(|p| p.eq_ignore_ascii_case("http") || p.eq_ignore_ascii_case("https"))
                .map(|p| p.to_ascii_lowercase())
                .unwrap_or_else(|| "http".to_string());
            format!("{proto}://{host}")
        }
        None => site.fallback_url().to_string(),
    }
}

/// First entry of a possibly comma-separated header, trimmed and non-empty
fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
