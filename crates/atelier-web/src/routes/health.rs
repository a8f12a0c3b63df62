//! Health check endpoints

use crate::services::AppState;
use crate::WebError;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "atelier-web"
    }))
}

async fn ready_check(State(state): State<AppState>) -> Result<Json<Value>, WebError> {
    state.store.ping().await?;

    Ok(Json(json!({
        "status": "ready"
    })))
}
