use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use tracing::{debug, error};

use inbox_db::queries::ConversationFilter;
use inbox_feed::build_feed;
use inbox_types::api::{ConversationQuery, FeedResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// Conversation list for the Telegram mini-app.
///
/// Filters by `status` and `search` in the store, then classifies and counts
/// the page. Counts cover only the returned page.
pub async fn list_conversations(
    State(state): State<AppState>,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Result<Json<FeedResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let filter = ConversationFilter {
        status: query.status_filter(),
        search: query.search_term().map(str::to_string),
        limit: query.effective_limit(),
    };

    // Run the blocking query off the async runtime
    let db = state.clone();
    let raw = tokio::task::spawn_blocking(move || {
        let store = db.db.as_ref().ok_or(ApiError::StoreUnavailable)?;
        store.list_conversations(&filter).map_err(ApiError::from)
    })
    .await
    .map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::Internal
    })??;

    let feed = build_feed(&raw);
    debug!(
        total = feed.counts.total,
        urgent = feed.counts.handoff_requested,
        "Built conversation feed"
    );

    Ok(Json(feed.into()))
}
