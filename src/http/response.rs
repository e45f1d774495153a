//! Response relay.
//!
//! # Responsibilities
//! - Copy upstream status and end-to-end headers to the client
//! - Stream the upstream body through a fixed transfer buffer
//!
//! # Design Decisions
//! - The body is never collected; each read is forwarded as a frame as soon
//!   as it arrives, so chunked/streaming upstreams reach the client promptly
//! - Dropping the response body (completion, error or client disconnect)
//!   drops the upstream stream and releases its connection

use std::io;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use tokio_util::io::{ReaderStream, StreamReader};

use crate::http::headers::forwardable_response_headers;

/// Size of the buffer each upstream read fills before being forwarded.
pub const TRANSFER_BUFFER_SIZE: usize = 128 * 1024;

/// Turn an upstream response into the response sent to the client.
pub fn relay_response(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = forwardable_response_headers(upstream.headers());

    let reader = StreamReader::new(upstream.bytes_stream().map_err(io::Error::other));
    let body = Body::from_stream(ReaderStream::with_capacity(reader, TRANSFER_BUFFER_SIZE));

    let mut response = Response::new(body);
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Answer to a CORS preflight: `200 OK`, empty body.
pub fn preflight_response() -> Response {
    StatusCode::OK.into_response()
}
