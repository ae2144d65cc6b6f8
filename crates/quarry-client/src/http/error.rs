//! Mapping of HTTP failures into [`AppError`].

use reqwest::StatusCode;

use quarry_core::{AppError, ErrorKind};

use crate::dto::ErrorBody;

/// Map a non-success response to an error, keeping the backend's detail.
pub fn status_error(status: StatusCode, body: &[u8]) -> AppError {
    let kind = match status {
        StatusCode::UNAUTHORIZED => ErrorKind::Authentication,
        StatusCode::FORBIDDEN => ErrorKind::Authorization,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ErrorKind::Validation,
        StatusCode::CONFLICT => ErrorKind::Conflict,
        _ => ErrorKind::ExternalService,
    };

    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message());

    let err = AppError::new(kind, format!("Backend responded with HTTP {}", status.as_u16()));
    match detail {
        Some(detail) => err.with_detail(detail),
        None => err,
    }
}

/// Map a transport-level failure (no usable response).
pub fn transport_error(err: reqwest::Error) -> AppError {
    let message = if err.is_timeout() {
        "Request to backend timed out".to_string()
    } else if err.is_connect() {
        "Could not connect to backend".to_string()
    } else if err.is_decode() {
        return AppError::with_source(
            ErrorKind::Serialization,
            format!("Failed to decode backend response: {err}"),
            err,
        );
    } else {
        format!("Backend request failed: {err}")
    };
    AppError::with_source(ErrorKind::Network, message, err)
}
