//! HTML head rewriting for link previews
//!
//! Targets the `<title>`, `description`, `og:*` and `twitter:*` tags of the
//! frontend's `index.html`. The template uses double-quoted attributes and
//! `/>` style meta tags; each tag is replaced independently and a tag that is
//! missing from the template is skipped. Everything else in the document is
//! left byte-for-byte untouched.

use super::resolver::PreviewMetadata;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const TWITTER_CARD: &str = "summary_large_image";
const OG_TYPE: &str = "article";

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title\b[^>]*>.*?</title>").unwrap());

/// `og:image` with its leading indentation, so inserted siblings line up
static OG_IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)([ \t]*)<meta\s+(name|property)\s*=\s*"og:image"\s+content\s*=\s*"[^"]*"\s*/?>"#)
        .unwrap()
});

/// Fixed image dimensions, always dropped. The preceding line break is
/// consumed so removal leaves no blank lines.
static OG_IMAGE_SIZE_RE: Lazy<Regex> = Lazy::new(|| image_property_pattern("width|height"));

/// Regenerated next to `og:image`; only removed when `og:image` is present
static OG_IMAGE_DERIVED_RE: Lazy<Regex> = Lazy::new(|| image_property_pattern("secure_url|type"));

static DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("description"));
static OG_TITLE_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("og:title"));
static OG_DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("og:description"));
static OG_TYPE_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("og:type"));
static OG_URL_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("og:url"));
static TWITTER_TITLE_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("twitter:title"));
static TWITTER_DESCRIPTION_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("twitter:description"));
static TWITTER_IMAGE_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("twitter:image"));
static TWITTER_IMAGE_ALT_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("twitter:image:alt"));
static TWITTER_CARD_RE: Lazy<Regex> = Lazy::new(|| meta_pattern("twitter:card"));

fn image_property_pattern(properties: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)(?:\r?\n)?[ \t]*<meta\s+(?:name|property)\s*=\s*"og:image:(?:{properties})"\s+content\s*=\s*"[^"]*"\s*/?>"#
    ))
    .unwrap()
}

/// `<meta name|property="KEY" content="..." />`, capture 1 is the attribute name
fn meta_pattern(key: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)<meta\s+(name|property)\s*=\s*"{}"\s+content\s*=\s*"[^"]*"\s*/?>"#,
        regex::escape(key)
    ))
    .unwrap()
}

/// Escape text for use inside a double- or single-quoted attribute or element body
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Result of a rewrite, with the tags the template did not contain
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub html: String,
    pub missing: Vec<&'static str>,
}

/// Rewrite the preview tags of `html` with `meta`
pub fn rewrite(html: &str, meta: &PreviewMetadata) -> String {
    rewrite_detailed(html, meta).html
}

pub fn rewrite_detailed(html: &str, meta: &PreviewMetadata) -> RewriteOutcome {
    let title = escape_html(&meta.title);
    let description = escape_html(&meta.description);
    let image_url = escape_html(&meta.image_url);
    let page_url = escape_html(&meta.page_url);
    let image_alt = escape_html(&meta.image_alt);

    let mut missing = Vec::new();

    // Fixed dimensions may not match the real image; secure_url/type are
    // re-emitted next to og:image below, so only drop them when it exists.
    let mut html = OG_IMAGE_SIZE_RE.replace_all(html, "").into_owned();
    if OG_IMAGE_RE.is_match(&html) {
        html = OG_IMAGE_DERIVED_RE.replace_all(&html, "").into_owned();
    }

    html = replace_tag(&html, &TITLE_RE, "title", &mut missing, |_| {
        format!("<title>{title}</title>")
    });

    let meta_tags: [(&'static str, &Lazy<Regex>, &str); 10] = [
        ("description", &DESCRIPTION_RE, description.as_str()),
        ("og:title", &OG_TITLE_RE, title.as_str()),
        ("og:description", &OG_DESCRIPTION_RE, description.as_str()),
        ("og:type", &OG_TYPE_RE, OG_TYPE),
        ("og:url", &OG_URL_RE, page_url.as_str()),
        ("twitter:title", &TWITTER_TITLE_RE, title.as_str()),
        ("twitter:description", &TWITTER_DESCRIPTION_RE, description.as_str()),
        ("twitter:image", &TWITTER_IMAGE_RE, image_url.as_str()),
        ("twitter:image:alt", &TWITTER_IMAGE_ALT_RE, image_alt.as_str()),
        ("twitter:card", &TWITTER_CARD_RE, TWITTER_CARD),
    ];

    for (key, re, value) in meta_tags {
        html = replace_tag(&html, re, key, &mut missing, |caps| {
            format!(r#"<meta {}="{}" content="{}" />"#, &caps[1], key, value)
        });
    }

    let mime = meta.image_mime_type.as_str();
    html = replace_tag(&html, &OG_IMAGE_RE, "og:image", &mut missing, |caps| {
        let indent = &caps[1];
        let attr = &caps[2];
        format!(
            "{indent}<meta {attr}=\"og:image\" content=\"{image_url}\" />\n\
             {indent}<meta {attr}=\"og:image:secure_url\" content=\"{image_url}\" />\n\
             {indent}<meta {attr}=\"og:image:type\" content=\"{mime}\" />"
        )
    });

    RewriteOutcome { html, missing }
}

fn replace_tag<F>(
    html: &str,
    re: &Regex,
    key: &'static str,
    missing: &mut Vec<&'static str>,
    replacement: F,
) -> String
where
    F: Fn(&Captures<'_>) -> String,
{
    if !re.is_match(html) {
        missing.push(key);
        return html.to_string();
    }
    re.replace_all(html, |caps: &Captures<'_>| replacement(caps))
        .into_owned()
}
