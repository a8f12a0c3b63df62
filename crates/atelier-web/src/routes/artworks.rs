//! Read-only artwork API for the frontend

use crate::services::AppState;
use crate::WebError;
use atelier_core::Artwork;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

pub fn artwork_routes() -> Router<AppState> {
    Router::new()
        .route("/api/artworks", get(list_artworks))
        .route("/api/artworks/{id}", get(get_artwork))
}

async fn list_artworks(State(state): State<AppState>) -> Result<Json<Value>, WebError> {
    let artworks = state.store.list_public_artworks().await?;

    Ok(Json(json!({ "artworks": artworks })))
}

async fn get_artwork(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Artwork>, WebError> {
    let id: i64 = id
        .parse()
        .map_err(|_| WebError::BadRequest(format!("Invalid artwork id: {id}")))?;

    match state.store.find_artwork_by_id(id).await? {
        Some(artwork) if artwork.status.is_public() => Ok(Json(artwork)),
        _ => Err(WebError::NotFound(format!("Artwork {id} not found"))),
    }
}
