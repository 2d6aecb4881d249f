use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use inbox_feed::Feed;
use inbox_types::api::{ConversationQuery, ErrorBody, FeedResponse};

use crate::error::FeedError;

const FEED_PATH: &str = "/api/telegram/conversations";

/// Message used when a failed response carries no readable error body.
const GENERIC_FAILURE: &str = "Falha ao carregar conversas";

#[derive(Clone)]
pub struct FeedClient {
    http: Client,
    base_url: String,
}

impl FeedClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::Transport)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET one page of the feed.
    pub async fn fetch(&self, query: &ConversationQuery) -> Result<Feed, FeedError> {
        let url = format!("{}{}", self.base_url, FEED_PATH);
        debug!(status = ?query.status, search = ?query.search, "Fetching conversation feed");

        let resp = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(FeedError::Transport)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| GENERIC_FAILURE.to_string());
            return Err(FeedError::Status { status, message });
        }

        let body: FeedResponse = resp.json().await.map_err(FeedError::Decode)?;
        Ok(body.into())
    }
}
