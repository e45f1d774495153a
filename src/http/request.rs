//! Inbound request handling: target extraction and outbound construction.
//!
//! # Responsibilities
//! - Read the `url` query parameter and validate it as an http(s) URL
//! - Rebuild the inbound request for the target: same method, same body
//!   stream, headers minus `Host` and hop-by-hop
//!
//! # Design Decisions
//! - Validation happens before any network I/O
//! - The body is never buffered; it is handed to the client as a stream

use axum::body::{Body, HttpBody};
use axum::http::request::Parts;
use url::{form_urlencoded, Url};

use crate::error::RelayError;
use crate::http::headers::forwardable_request_headers;
use crate::upstream::UpstreamClient;

/// Name of the query parameter carrying the target URL.
pub const TARGET_PARAM: &str = "url";

/// An absolute `http` or `https` URL to relay to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(Url);

impl Target {
    /// Extract the target from a raw query string. Only the first `url`
    /// parameter is considered.
    pub fn from_query(query: Option<&str>) -> Result<Self, RelayError> {
        let raw = query
            .and_then(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .find(|(key, _)| key == TARGET_PARAM)
                    .map(|(_, value)| value)
            })
            .filter(|value| !value.is_empty())
            .ok_or(RelayError::MissingTarget)?;

        Self::parse(&raw)
    }

    /// Parse and validate a target URL.
    pub fn parse(raw: &str) -> Result<Self, RelayError> {
        let url = Url::parse(raw).map_err(|_| RelayError::InvalidTarget)?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            _ => Err(RelayError::InvalidTarget),
        }
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn into_url(self) -> Url {
        self.0
    }
}

/// Build the request sent upstream from the inbound request's parts.
pub fn build_outbound(
    upstream: &UpstreamClient,
    parts: &Parts,
    body: Body,
    target: Target,
) -> Result<reqwest::Request, RelayError> {
    let mut outbound = upstream.build_request(parts.method.clone(), target.into_url())?;
    // Keeps the `Authorization` reqwest derives from `user:pass@` unless the
    // caller sent its own.
    outbound
        .headers_mut()
        .extend(forwardable_request_headers(&parts.headers));

    // An empty inbound body stays empty rather than becoming a chunked stream.
    if !body.is_end_stream() {
        *outbound.body_mut() = Some(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    Ok(outbound)
}
