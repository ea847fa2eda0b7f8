//! Request correlation utilities.
//!
//! Correlation ids are passed explicitly: handlers resolve the id once per
//! request and hand it to every downstream call and log event. There is no
//! ambient logger context to inherit from.

use axum::http::HeaderMap;

use crate::core::error::BridgeError;

/// Resolve the correlation id for an inbound request.
///
/// An `x-request-id` header is honored verbatim (lossily coerced to text
/// when it is not valid UTF-8); otherwise a fresh id is generated.
pub fn correlation_id(headers: &HeaderMap) -> String {
    match headers.get("x-request-id") {
        Some(value) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
        None => generate_request_id(),
    }
}

/// Generate a new unique request ID using UUID v4.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Log a terminal request failure.
///
/// Every failure is logged twice: once as a warning carrying the raw error,
/// once as an error-level formatted message. Both carry the correlation id.
pub fn log_failure(request_id: &str, err: &BridgeError) {
    tracing::warn!(request_id = %request_id, error = ?err, "Request failed");
    tracing::error!(request_id = %request_id, "Error processing request: {}", err);
}
