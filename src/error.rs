//! Application error type and its HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::deco::validator::{TOOL, TOOL_VERSION};
use crate::deco::PlanRequestError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidRequest(#[from] PlanRequestError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    fn error_type(&self) -> &'static str {
        match self {
            Self::InvalidRequest(PlanRequestError::Gas(_)) => "invalid_gas",
            Self::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejecting plan request: {}", self);
        let status = match &self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(serde_json::json!({
                "error": self.to_string(),
                "error_type": self.error_type(),
                "tool": TOOL,
                "tool_version": TOOL_VERSION
            })),
        )
            .into_response()
    }
}
