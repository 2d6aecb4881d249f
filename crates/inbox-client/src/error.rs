use thiserror::Error;

/// Why a feed fetch produced no data.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Feed request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Feed unavailable ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Invalid feed payload: {0}")]
    Decode(#[source] reqwest::Error),
}

impl FeedError {
    /// True when the server answered but reported a failure.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::Status { status, .. } if *status >= 500)
    }
}
