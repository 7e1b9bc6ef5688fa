//! API errors and their JSON representation.
//!
//! Every failure leaves the service as
//! `{"success": false, "error_code": <status>, "error_message": <text>}`.

use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::telemetry::API_ERRORS_CNTR;

const INTERNAL_MESSAGE: &str = "Unexpected error occurred.";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Undecodable or invalid request body (400)
    #[error("{0}")]
    BadRequest(String),

    /// Resource does not exist (404)
    #[error("{0}")]
    NotFound(String),

    /// Known route, unsupported method (405)
    #[error("{0}")]
    MethodNotAllowed(String),

    /// Route parameter of the wrong type (422)
    #[error("{0}")]
    Unprocessable(String),

    /// Database failure (500, logged)
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Anything else (500, logged)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error_code: u16,
    error_message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            Self::Database(_) | Self::Internal(_) => {
                // The cause stays in the logs
                tracing::error!(error = %self, "Request failed");
                INTERNAL_MESSAGE.to_owned()
            }
            other => {
                tracing::warn!(status = status.as_u16(), "{other}");
                other.to_string()
            }
        };
        API_ERRORS_CNTR.with_label_values(&[status.as_str()]).inc();

        let body = ErrorBody {
            success: false,
            error_code: status.as_u16(),
            error_message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => {
                Self::Unprocessable(format!("Unprocessable entity: {}", e.body_text()))
            }
            other => Self::Internal(anyhow::anyhow!(other.body_text())),
        }
    }
}
