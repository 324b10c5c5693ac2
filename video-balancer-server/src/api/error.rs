//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tracing::{debug, error};
use validator::ValidationErrors;
use video_balancer_types::{BalancerError, RepositoryError};

#[derive(Debug)]
pub enum ApiError {
    Balancer(BalancerError),
    BadRequest(String),
    NotFound(String),
}

impl From<BalancerError> for ApiError {
    fn from(err: BalancerError) -> Self {
        Self::Balancer(err)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        Self::Balancer(BalancerError::Repository(err))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            Self::NotFound(detail) => (StatusCode::NOT_FOUND, detail),
            Self::Balancer(err) => {
                let status = StatusCode::from_u16(err.http_status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if err.is_client_error() {
                    debug!(error = %err, %status, "Request rejected");
                    (status, err.to_string())
                } else {
                    error!(error = %err, "Request failed");
                    (status, format!("Internal server error: {}", err))
                }
            },
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
