use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use tracing::{error, warn};

use crate::error::FolioError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned by a route, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl std::error::Error for ApiError {}

impl From<FolioError> for ApiError {
    fn from(err: FolioError) -> Self {
        let status = match &err {
            FolioError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            FolioError::NotFound(_) => StatusCode::NOT_FOUND,
            FolioError::Github { status: 404, .. } => StatusCode::NOT_FOUND,
            FolioError::Github { .. } | FolioError::Http(_) => StatusCode::BAD_GATEWAY,
            FolioError::Parse(_) => StatusCode::BAD_REQUEST,
            FolioError::Serde(_) | FolioError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, "{}", self.message);
        } else {
            warn!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
