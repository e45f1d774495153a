//! Per-request error taxonomy.
//!
//! Every error is terminal for the request that raised it and is rendered
//! as a plain-text response; nothing propagates past the handler.

use std::error::Error as StdError;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failure while relaying a single request.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The `url` query parameter is absent or empty.
    #[error("Missing 'url' query parameter")]
    MissingTarget,

    /// The `url` query parameter is not an absolute http(s) URL.
    #[error("Invalid URL")]
    InvalidTarget,

    /// The outbound request could not be assembled.
    #[error("Failed to create request")]
    BuildRequest(#[source] reqwest::Error),

    /// Connecting to or exchanging headers with the upstream failed.
    #[error("Failed to fetch URL: {}", error_chain(.0))]
    Upstream(#[source] reqwest::Error),

    /// The upstream did not answer within the dispatch ceiling.
    #[error("Failed to fetch URL: request timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingTarget | RelayError::InvalidTarget => StatusCode::BAD_REQUEST,
            RelayError::BuildRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Upstream(_) | RelayError::Timeout(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Render an error and its sources as `outer: inner: root`.
///
/// reqwest keeps the interesting part (refused, DNS, TLS) in the source
/// chain, so the top-level message alone is not useful to the caller.
pub fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
