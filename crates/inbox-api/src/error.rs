use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use inbox_types::api::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database not available")]
    StoreUnavailable,

    #[error("Invalid query: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable | Self::Store(_) | Self::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("[telegram-api] {}", self);
        } else {
            warn!("[telegram-api] {}", self);
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
