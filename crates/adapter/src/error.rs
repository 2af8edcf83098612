//! Error types for the HTTP adapter.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::core::GridError;
use crate::protocol::{create_error, ErrorCode};
use crate::types::MAX_STEPS_PER_REQUEST;

/// Request errors. Every variant leaves the grid unchanged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resize outside the accepted bounds.
    #[error(transparent)]
    InvalidDimensions(#[from] GridError),

    /// Body could not be decoded into the expected shape.
    #[error("Malformed request body: {0}")]
    MalformedRequest(#[from] serde_json::Error),

    /// Step count outside `0..=MAX_STEPS_PER_REQUEST`.
    #[error("steps must be within 0..={max}, got {0}", max = MAX_STEPS_PER_REQUEST)]
    InvalidSteps(i64),
}

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ApiError::InvalidDimensions(_) => ErrorCode::InvalidDimensions,
            ApiError::MalformedRequest(_) => ErrorCode::MalformedRequest,
            ApiError::InvalidSteps(_) => ErrorCode::InvalidSteps,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = create_error(self.code(), &self.to_string());
        (self.status(), Json(body)).into_response()
    }
}
