pub mod conversations;
pub mod error;
pub mod state;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::state::AppState;

/// All API routes, with state applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/telegram/conversations", get(conversations::list_conversations))
        .route("/health", get(health))
        .with_state(state)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
