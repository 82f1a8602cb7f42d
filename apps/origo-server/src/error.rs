use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use origo_astro::{ChartError, ProfileError};
use origo_oracle::OracleError;
use origo_store::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("uid is required")]
    MissingUid,
    #[error("malformed request body: {0}")]
    BadRequest(String),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUid | ApiError::BadRequest(_) | ApiError::Profile(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(_) | ApiError::Oracle(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Profile(ProfileError::Chart(ChartError::MissingAscendant)) => {
                "cannot generate chart: ascendant position unavailable".to_string()
            }
            ApiError::Profile(e) => format!("cannot generate chart: {}", e),
            other => other.to_string(),
        }
    }
}

/// Profile-save failures: `{"status": "error", "message": ...}`.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::warn!("Request rejected: {}", self);
        }
        (status, Json(json!({ "status": "error", "message": self.message() }))).into_response()
    }
}

/// Chat failures keep the chat reply shape so the client can show them.
#[derive(Debug)]
pub struct ChatFailure(pub ApiError);

impl From<StoreError> for ChatFailure {
    fn from(e: StoreError) -> Self {
        ChatFailure(e.into())
    }
}

impl From<OracleError> for ChatFailure {
    fn from(e: OracleError) -> Self {
        ChatFailure(e.into())
    }
}

impl From<JsonRejection> for ChatFailure {
    fn from(e: JsonRejection) -> Self {
        ChatFailure(ApiError::BadRequest(e.body_text()))
    }
}

impl IntoResponse for ChatFailure {
    fn into_response(self) -> Response {
        if self.0.status().is_client_error() {
            log::warn!("Chat request rejected: {}", self.0);
            let body = json!({ "reply": "Invalid request.", "error": "bad_request" });
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }
        log::error!("Chat analysis failed: {}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "reply": "Server Error." }))).into_response()
    }
}
