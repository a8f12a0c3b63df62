//! Link-preview crawler detection
//!
//! User-agent substring matching. This only decides whether to render a
//! static preview page; it is not an access control mechanism.

/// Lowercase user-agent fragments of social and search crawlers
pub const KNOWN_CRAWLERS: &[&str] = &[
    "facebookexternalhit",
    "facebot",
    "twitterbot",
    "slackbot",
    "slack-imgproxy",
    "discordbot",
    "linkedinbot",
    "whatsapp",
    "telegrambot",
    "line-poker",
    "pinterest",
    "redditbot",
    "applebot",
    "skypeuripreview",
    "embedly",
    "vkshare",
    "mastodon",
    "googlebot",
    "bingbot",
    "duckduckbot",
    "yandexbot",
    "baiduspider",
    "hatena",
];

/// True when `user_agent` contains a known crawler signature (case-insensitive)
pub fn is_crawler(user_agent: &str) -> bool {
    if user_agent.is_empty() {
        return false;
    }
    let ua = user_agent.to_ascii_lowercase();
    KNOWN_CRAWLERS.iter().any(|sig| ua.contains(sig))
}

/// [`KNOWN_CRAWLERS`] plus signatures configured at startup
#[derive(Debug, Clone, Default)]
pub struct CrawlerClassifier {
    extra: Vec<String>,
}

impl CrawlerClassifier {
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extra = extra
            .into_iter()
            .map(|sig| sig.as_ref().trim().to_ascii_lowercase())
            .filter(|sig| !sig.is_empty())
            .collect();
        Self { extra }
    }

    pub fn is_crawler(&self, user_agent: &str) -> bool {
        if is_crawler(user_agent) {
            return true;
        }
        if self.extra.is_empty() || user_agent.is_empty() {
            return false;
        }
        let ua = user_agent.to_ascii_lowercase();
        self.extra.iter().any(|sig| ua.contains(sig.as_str()))
    }
}
