//! Boundary mapping from [`CatalogError`] to HTTP responses.
//!
//! Client-caused failures surface as 4xx with a human-readable message;
//! everything else becomes a generic 500 that exposes nothing beyond the
//! message text.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::CatalogError;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidData { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Parse(_)
            | CatalogError::Internal(_)
            | CatalogError::Configuration(_)
            | CatalogError::External(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "Not Found",
            CatalogError::InvalidData { .. } => "Invalid Data",
            CatalogError::Configuration(_) => "Configuration Error",
            CatalogError::Parse(_) | CatalogError::Internal(_) | CatalogError::External(_) => {
                "Internal Server Error"
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            CatalogError::InvalidData {
                message,
                violations,
            } => ErrorBody {
                error: "Invalid Data",
                message,
                details: (!violations.is_empty()).then_some(violations),
            },
            other => ErrorBody {
                error: other.label(),
                message: other.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
