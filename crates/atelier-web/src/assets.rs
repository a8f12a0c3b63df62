//! Static frontend serving
//!
//! - `web.static_dir` set: served from that directory
//! - otherwise: the frontend build embedded via rust-embed
//!
//! Unknown extension-less paths fall back to `index.html` so client-side
//! routes such as `/artwork/42` load the app.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use rust_embed::Embed;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// Embedded frontend build
#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/web/dist"]
struct Assets;

/// Raw bytes of an embedded file
pub fn embedded_file(path: &str) -> Option<Vec<u8>> {
    <Assets as Embed>::get(path).map(|file| file.data.into_owned())
}

/// Create router for serving static assets
pub fn static_routes(static_dir: Option<&str>) -> Router {
    match static_dir {
        Some(dir) => {
            tracing::info!("Serving static assets from: {}", dir);
            serve_from_dir(dir)
        }
        None => {
            tracing::info!("Serving embedded static assets");
            Router::new().fallback(embedded_handler)
        }
    }
}

fn serve_from_dir(dir: &str) -> Router {
    let index = Path::new(dir).join("index.html");
    Router::new().fallback_service(
        ServeDir::new(dir)
            .append_index_html_on_directories(true)
            .fallback(ServeFile::new(index)),
    )
}

async fn embedded_handler(req: Request<Body>) -> impl IntoResponse {
    let path = req.uri().path().trim_start_matches('/');

    if let Some(data) = embedded_file(path) {
        return respond_with_asset(path, data);
    }

    let index_path = if path.is_empty() {
        "index.html".to_string()
    } else {
        format!("{}/index.html", path.trim_end_matches('/'))
    };
    if let Some(data) = embedded_file(&index_path) {
        return respond_with_asset(&index_path, data);
    }

    // SPA fallback: serve index.html for non-asset paths
    if !path.contains('.') {
        if let Some(data) = embedded_file("index.html") {
            return respond_with_asset("index.html", data);
        }
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn respond_with_asset(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.to_string())],
        Body::from(data),
    )
        .into_response()
}
