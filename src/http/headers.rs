//! Header policy for both directions of the relay.
//!
//! Hop-by-hop headers describe a single connection, not the payload, and
//! never cross the relay. `Host` is dropped from inbound requests so the
//! outbound client derives it from the target.

use axum::http::header::{
    self, HeaderMap, HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS,
    ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_EXPOSE_HEADERS,
};

/// Headers that apply to one hop only, lowercase.
pub const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];

/// Methods advertised in `Access-Control-Allow-Methods`.
pub const CORS_ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS, PATCH";

/// Case-insensitive membership in [`HOP_BY_HOP_HEADERS`].
pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|hop| hop.eq_ignore_ascii_case(name))
}

/// Inbound headers that may be sent upstream.
pub fn forwardable_request_headers(inbound: &HeaderMap) -> HeaderMap {
    filter_headers(inbound, |name| *name != header::HOST && !is_hop_by_hop(name.as_str()))
}

/// Upstream headers that may be sent back to the client.
pub fn forwardable_response_headers(upstream: &HeaderMap) -> HeaderMap {
    filter_headers(upstream, |name| !is_hop_by_hop(name.as_str()))
}

fn filter_headers(source: &HeaderMap, keep: impl Fn(&HeaderName) -> bool) -> HeaderMap {
    let mut filtered = HeaderMap::with_capacity(source.len());
    // `iter` yields every value of a repeated header, so `append` keeps them all.
    for (name, value) in source.iter() {
        if keep(name) {
            filtered.append(name.clone(), value.clone());
        }
    }
    filtered
}

/// The four permissive CORS headers added to every response.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 4] {
    [
        (ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        (ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(CORS_ALLOW_METHODS)),
        (ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("*")),
        (ACCESS_CONTROL_EXPOSE_HEADERS, HeaderValue::from_static("*")),
    ]
}
