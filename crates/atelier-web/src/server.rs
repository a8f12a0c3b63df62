use crate::assets::static_routes;
use crate::preview::preview_middleware;
use crate::routes::{artwork_routes, health_routes, location_routes};
use crate::services::{init_state, AppState};
use crate::{Result, WebError};
use atelier_config::AtelierConfig;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::{middleware, Router};
use std::net::SocketAddr;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Full application router.
///
/// The preview middleware wraps everything, including the static fallback,
/// so it sees detail-page requests before the SPA bootstrap does.
pub fn build_router(state: AppState) -> Router {
    let web = &state.config.web;

    let origins: Vec<HeaderValue> = web
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let max_body_size = web.max_body_size_mb * 1024 * 1024;
    let static_dir = web.static_dir.clone();
    let preview_state = state.preview_state();

    Router::new()
        .merge(artwork_routes())
        .merge(location_routes())
        .merge(health_routes())
        .with_state(state)
        .merge(static_routes(static_dir.as_deref()))
        .layer(middleware::from_fn_with_state(preview_state, preview_middleware))
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(cors)
}

pub async fn start_server(config: AtelierConfig) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port)
        .parse()
        .map_err(|e| WebError::Config(format!("Invalid address: {e}")))?;

    let state = init_state(config)?;
    let app = build_router(state);

    tracing::info!("Starting web server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(WebError::Io)?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(WebError::Io)?;

    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
