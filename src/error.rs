use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::db::StoreError;
use crate::response::ApiResponse;

/// Handler-boundary errors, rendered as `{success: false, message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    MissingPayload(&'static str),

    #[error("Invalid payload: {0}")]
    BadRequest(String),

    /// An extractor rejection; keeps the status axum assigned (400, 413, ...).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingPayload(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Constraint(_)) => StatusCode::BAD_REQUEST,
            Self::Store(StoreError::Operational(_)) | Self::Store(StoreError::Database { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Store(StoreError::Constraint(detail)) => format!("Integrity error: {}", detail),
            Self::Store(StoreError::Operational(detail)) => {
                format!("Operational error: {}", detail)
            }
            Self::Store(StoreError::Database { code, detail }) => {
                format!("Database error ({}): {}", code, detail)
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        } else {
            warn!(error = %self, %status, "request rejected");
        }
        (status, Json(ApiResponse::failure(message))).into_response()
    }
}
