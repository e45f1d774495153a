//! The relay handler.
//!
//! A single linear pass per request:
//! extract target → validate → build outbound → dispatch → relay.
//! Any step may exit early with a [`RelayError`], which renders as a
//! plain-text response.

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    response::{IntoResponse, Response},
};

use crate::error::RelayError;
use crate::http::request::{build_outbound, Target};
use crate::http::response::{preflight_response, relay_response};
use crate::observability::metrics;
use crate::upstream::UpstreamClient;

/// State shared read-only by every request task.
#[derive(Debug, Clone)]
pub struct RelayState {
    pub upstream: UpstreamClient,
    /// Contact the upstream for `OPTIONS` before answering the preflight.
    pub forward_preflight: bool,
}

/// Axum entry point.
pub async fn relay_handler(State(state): State<RelayState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();

    let response = match relay(&state, request).await {
        Ok(response) => response,
        Err(e) => e.into_response(),
    };

    metrics::record_request(method.as_str(), response.status().as_u16(), start_time);
    response
}

async fn relay(state: &RelayState, request: Request<Body>) -> Result<Response, RelayError> {
    let target = Target::from_query(request.uri().query())?;
    let (parts, body) = request.into_parts();
    let preflight = parts.method == Method::OPTIONS;

    if preflight && !state.forward_preflight {
        return Ok(preflight_response());
    }

    let outbound = build_outbound(&state.upstream, &parts, body, target)?;
    let upstream = state.upstream.dispatch(outbound).await?;

    if preflight {
        drop(upstream);
        return Ok(preflight_response());
    }

    Ok(relay_response(upstream))
}
