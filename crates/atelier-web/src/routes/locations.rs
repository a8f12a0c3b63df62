use crate::services::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

pub fn location_routes() -> Router<AppState> {
    Router::new().route("/api/locations", get(list_locations))
}

async fn list_locations(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "locations": state.catalog.entries() }))
}
