//! Error types and handling for the bridge.
//!
//! This module provides a unified error type [`BridgeError`] that wraps the
//! failure sources of a request and implements HTTP response conversion.
//!
//! Downstream failures (transport errors and non-2xx statuses) are
//! indistinguishable to callers: both surface as a bare `400`. The
//! distinction lives only in the logs. Rejected fill-in-the-middle requests
//! with no `stop` sequence are the one case that carries an error body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Transport-level failures from the reqwest client (connection
    /// refused, timeout, malformed response body)
    #[error("Upstream request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The downstream server answered with a non-2xx status
    #[error("Upstream returned HTTP {status}")]
    UpstreamStatus { status: u16 },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Fill-in-the-middle request without a stop sequence; rejected before
    /// any downstream call is made
    #[error("`stop` must contain at least one sequence")]
    MissingStop,
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        match self {
            // Explicit client error with a descriptive body
            BridgeError::MissingStop => {
                let body = Json(json!({
                    "error": {
                        "message": self.to_string(),
                        "type": "invalid_request_error",
                        "code": StatusCode::BAD_REQUEST.as_u16()
                    }
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            // Downstream and mapping failures collapse to a bare 400,
            // mirroring the original bridge contract
            BridgeError::Transport(_)
            | BridgeError::UpstreamStatus { .. }
            | BridgeError::Serialization(_) => StatusCode::BAD_REQUEST.into_response(),
        }
    }
}

/// Convenience type alias for Results using [`BridgeError`].
pub type Result<T> = std::result::Result<T, BridgeError>;
