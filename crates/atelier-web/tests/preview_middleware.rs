//! End-to-end tests of the crawler preview middleware through the full router

use async_trait::async_trait;
use atelier_config::AtelierConfig;
use atelier_core::{Artwork, ArtworkStore, StorageError, StorageResult};
use atelier_sqlite::{SqliteArtworkStore, SqlitePool};
use atelier_web::preview::{PassthroughReason, PreviewDecision};
use atelier_web::{build_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const FACEBOOK: &str = "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)";
const BROWSER: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="ja">
  <head>
    <meta charset="UTF-8" />
    <title>ATELIER ISSEI</title>
    <meta name="description" content="default" />
    <meta property="og:title" content="ATELIER ISSEI" />
    <meta property="og:description" content="default" />
    <meta property="og:type" content="website" />
    <meta property="og:url" content="https://atelier-issei.com" />
    <meta property="og:image" content="https://atelier-issei.com/og.jpg" />
    <meta property="og:image:width" content="1200" />
    <meta property="og:image:height" content="630" />
    <meta name="twitter:card" content="summary" />
    <meta name="twitter:title" content="ATELIER ISSEI" />
    <meta name="twitter:description" content="default" />
    <meta name="twitter:image" content="https://atelier-issei.com/og.jpg" />
    <meta name="twitter:image:alt" content="ATELIER ISSEI" />
  </head>
  <body><div id="root"></div></body>
</html>
"#;

struct TestApp {
    router: Router,
    state: AppState,
    _static_dir: TempDir,
}

impl TestApp {
    async fn new() -> Self {
        let store = SqliteArtworkStore::new(SqlitePool::memory().unwrap());
        store
            .upsert_artwork(
                Artwork::new(42, "青い静寂")
                    .with_description("深い青の中に沈む静けさを描いた作品。")
                    .with_image_url("/artworks/42.jpg"),
            )
            .await
            .unwrap();
        store
            .upsert_artwork(
                Artwork::new(7, "<script>alert(1)</script>").with_image_url("/artworks/7.png"),
            )
            .await
            .unwrap();

        Self::with_store(Arc::new(store), |_| {}).await
    }

    async fn with_store(
        store: Arc<dyn ArtworkStore>,
        configure: impl FnOnce(&mut AtelierConfig),
    ) -> Self {
        let static_dir = TempDir::new().unwrap();
        std::fs::write(static_dir.path().join("index.html"), TEMPLATE).unwrap();

        let mut config = AtelierConfig::default();
        config.web.static_dir = Some(static_dir.path().to_string_lossy().into_owned());
        configure(&mut config);

        let state = AppState::new(store, config);
        Self {
            router: build_router(state.clone()),
            state,
            _static_dir: static_dir,
        }
    }

    async fn get(&self, uri: &str, user_agent: &str) -> (StatusCode, HeaderMap, String) {
        self.send(
            Request::get(uri)
                .header(header::HOST, "localhost:3000")
                .header(header::USER_AGENT, user_agent)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

struct FailingStore;

#[async_trait]
impl ArtworkStore for FailingStore {
    async fn find_artwork_by_id(&self, _id: i64) -> StorageResult<Option<Artwork>> {
        Err(StorageError::Backend("connection refused".into()))
    }
    async fn list_public_artworks(&self) -> StorageResult<Vec<Artwork>> {
        Err(StorageError::Backend("connection refused".into()))
    }
    async fn upsert_artwork(&self, _artwork: Artwork) -> StorageResult<i64> {
        Err(StorageError::Backend("connection refused".into()))
    }
    async fn count_artworks(&self) -> StorageResult<u64> {
        Err(StorageError::Backend("connection refused".into()))
    }
    async fn ping(&self) -> StorageResult<()> {
        Err(StorageError::Backend("connection refused".into()))
    }
}

#[tokio::test]
async fn test_crawler_gets_artwork_preview() {
    let app = TestApp::new().await;
    let (status, headers, body) = app.get("/artwork/42", FACEBOOK).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(body.contains("<title>ATELIER ISSEI - 青い静寂</title>"));
    assert!(body.contains(
        r#"<meta property="og:image" content="http://localhost:3000/artworks/42.jpg" />"#
    ));
    assert!(body.contains(
        r#"<meta property="og:image:secure_url" content="http://localhost:3000/artworks/42.jpg" />"#
    ));
    assert!(body.contains(r#"<meta property="og:image:type" content="image/jpeg" />"#));
    assert!(body.contains(r#"<meta name="twitter:card" content="summary_large_image" />"#));
    assert!(body.contains(r#"<meta property="og:type" content="article" />"#));
    assert!(body.contains(r#"<meta property="og:url" content="http://localhost:3000/artwork/42" />"#));
    assert!(!body.contains("og:image:width"));
    assert!(!body.contains("og:image:height"));
}

#[tokio::test]
async fn test_unrelated_tags_are_byte_identical() {
    let app = TestApp::new().await;
    let (_, _, body) = app.get("/artwork/42", FACEBOOK).await;

    assert!(body.starts_with("<!DOCTYPE html>\n<html lang=\"ja\">\n  <head>\n    <meta charset=\"UTF-8\" />\n"));
    assert!(body.ends_with("  </head>\n  <body><div id=\"root\"></div></body>\n</html>\n"));
}

#[tokio::test]
async fn test_crawler_gets_location_preview() {
    let app = TestApp::new().await;
    let (status, _, body) = app.get("/exhibition/location/paris", "Twitterbot/1.0").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<title>ATELIER ISSEI - パリ第一回</title>"));
    assert!(body.contains(
        "http://localhost:3000/images/exhibitions/paris/%E3%83%91%E3%83%AA%E5%B1%95%E7%A4%BA.jpg"
    ));
}

#[tokio::test]
async fn test_browser_gets_unmodified_app() {
    let app = TestApp::new().await;
    for path in ["/artwork/42", "/exhibition/location/paris"] {
        let (status, _, body) = app.get(path, BROWSER).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, TEMPLATE, "{path}");
    }
}

#[tokio::test]
async fn test_unmatched_paths_pass_through_for_crawlers() {
    let app = TestApp::new().await;
    for path in ["/", "/about", "/artwork/abc", "/artwork/42/edit", "/exhibition"] {
        let (status, _, body) = app.get(path, FACEBOOK).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(body, TEMPLATE, "{path}");
    }
}

#[tokio::test]
async fn test_missing_entities_pass_through() {
    let app = TestApp::new().await;

    let (status, _, body) = app.get("/artwork/999999", FACEBOOK).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, TEMPLATE);

    let (status, _, body) = app.get("/exhibition/location/atlantis", FACEBOOK).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, TEMPLATE);
}

#[tokio::test]
async fn test_store_failure_fails_open() {
    let app = TestApp::with_store(Arc::new(FailingStore), |_| {}).await;
    let (status, _, body) = app.get("/artwork/42", FACEBOOK).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, TEMPLATE);
}

#[tokio::test]
async fn test_title_markup_is_escaped() {
    let app = TestApp::new().await;
    let (_, _, body) = app.get("/artwork/7", "Slackbot-LinkExpanding 1.0").await;

    assert!(!body.contains("<script>"));
    assert!(body.contains("<title>ATELIER ISSEI - &lt;script&gt;alert(1)&lt;/script&gt;</title>"));
    assert!(body.contains(r#"<meta property="og:image:type" content="image/png" />"#));
}

#[tokio::test]
async fn test_forwarded_headers_shape_urls() {
    let app = TestApp::new().await;
    let request = Request::get("/artwork/42?utm_source=share")
        .header(header::HOST, "127.0.0.1:3000")
        .header("x-forwarded-proto", "https")
        .header("x-forwarded-host", "atelier.example")
        .header(header::USER_AGENT, "Discordbot/2.0")
        .body(Body::empty())
        .unwrap();

    let (_, _, body) = app.send(request).await;
    assert!(body.contains(r#"<meta property="og:url" content="https://atelier.example/artwork/42" />"#));
    assert!(body.contains("https://atelier.example/artworks/42.jpg"));
}

#[tokio::test]
async fn test_configured_public_url_wins() {
    let store = SqliteArtworkStore::new(SqlitePool::memory().unwrap());
    store
        .upsert_artwork(Artwork::new(42, "青い静寂").with_image_url("/artworks/42"))
        .await
        .unwrap();
    let app = TestApp::with_store(Arc::new(store), |config| {
        config.site.public_url = Some("https://www.atelier-issei.com".into());
    })
    .await;

    let (_, _, body) = app.get("/artwork/42", FACEBOOK).await;
    assert!(body.contains(
        r#"<meta property="og:image" content="https://www.atelier-issei.com/artworks/42.jpg" />"#
    ));
}

#[tokio::test]
async fn test_disabled_preview_passes_through() {
    let store = SqliteArtworkStore::new(SqlitePool::memory().unwrap());
    store.upsert_artwork(Artwork::new(42, "x")).await.unwrap();
    let app = TestApp::with_store(Arc::new(store), |config| {
        config.preview.enabled = false;
    })
    .await;

    let (_, _, body) = app.get("/artwork/42", FACEBOOK).await;
    assert_eq!(body, TEMPLATE);
}

#[tokio::test]
async fn test_api_routes_are_not_rewritten_for_crawlers() {
    let app = TestApp::new().await;
    let (status, headers, body) = app.get("/api/artworks/42", FACEBOOK).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["title"], "青い静寂");
}

#[tokio::test]
async fn test_post_is_never_previewed() {
    let app = TestApp::new().await;
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(FACEBOOK));

    let decision = app
        .state
        .preview_state()
        .decide(&Method::POST, "/artwork/42", &headers)
        .await;
    assert_eq!(decision, PreviewDecision::Passthrough(PassthroughReason::Method));
}

#[tokio::test]
async fn test_unreadable_template_fails_open() {
    let empty_dir = TempDir::new().unwrap();
    let store = SqliteArtworkStore::new(SqlitePool::memory().unwrap());
    store.upsert_artwork(Artwork::new(42, "x")).await.unwrap();

    let mut config = AtelierConfig::default();
    config.web.static_dir = Some(empty_dir.path().to_string_lossy().into_owned());
    let state = AppState::new(Arc::new(store), config);

    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(FACEBOOK));

    let decision = state
        .preview_state()
        .decide(&Method::GET, "/artwork/42", &headers)
        .await;
    assert_eq!(
        decision,
        PreviewDecision::Passthrough(PassthroughReason::TemplateUnavailable)
    );
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = TestApp::new().await;
    let (status, _, _) = app.get("/health", BROWSER).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, _) = app.get("/ready", BROWSER).await;
    assert_eq!(status, StatusCode::OK);

    let failing = TestApp::with_store(Arc::new(FailingStore), |_| {}).await;
    let (status, _, _) = failing.get("/ready", BROWSER).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}
