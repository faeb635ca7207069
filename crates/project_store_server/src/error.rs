//! HTTP error envelope: every failure is rendered as `{"error": "<message>"}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use project_store_core::ServiceError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    NotFound,
    RouteNotFound,
    /// Body could not be extracted; keeps the extractor's status code.
    Rejected(StatusCode, String),
    LoadFailed,
    SaveFailed,
    Unexpected,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Rejected(status, _) => *status,
            Self::LoadFailed | Self::SaveFailed | Self::Unexpected => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotFound => "Project not found",
            Self::RouteNotFound => "Route not found",
            Self::Rejected(_, message) => message,
            Self::LoadFailed => "Failed to load projects",
            Self::SaveFailed => "Failed to save project",
            Self::Unexpected => "Internal server error",
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::Persistence(err) if err.is_read_failure() => Self::LoadFailed,
            ServiceError::Persistence(_) => Self::SaveFailed,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::Rejected(value.status(), value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_error module=api status=error http_status={} message={}",
                status.as_u16(),
                self.message()
            );
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
