//! Detail-page route matching

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// `/artwork/42` (ASCII digits only)
static ARTWORK_ROUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/artwork/([0-9]+)(?:\?.*)?$").unwrap());

/// `/exhibition/location/paris`
static LOCATION_ROUTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/exhibition/location/([^/?]+)(?:\?.*)?$").unwrap());

/// The entity a detail page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityReference {
    Artwork { id: i64 },
    Location { slug: String },
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityReference::Artwork { id } => write!(f, "artwork:{id}"),
            EntityReference::Location { slug } => write!(f, "location:{slug}"),
        }
    }
}

/// Map a request path (query string allowed) to the entity it shows
pub fn match_route(path: &str) -> Option<EntityReference> {
    if let Some(caps) = ARTWORK_ROUTE_RE.captures(path) {
        return caps[1]
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(|id| EntityReference::Artwork { id });
    }

    if let Some(caps) = LOCATION_ROUTE_RE.captures(path) {
        let raw = &caps[1];
        let slug = urlencoding::decode(raw)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        return Some(EntityReference::Location { slug });
    }

    None
}
