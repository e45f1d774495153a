//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the relay handler
//! - Apply CORS headers to every response, errors included
//! - Wire up request tracing
//! - Serve on a listener until shutdown is signalled

use axum::{routing::any, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::RelayConfig;
use crate::http::headers::cors_headers;
use crate::http::relay::{relay_handler, RelayState};
use crate::upstream::UpstreamClient;

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    config: RelayConfig,
}

impl RelayServer {
    /// Create a new server. Fails only if the outbound client cannot be built.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let state = RelayState {
            upstream: UpstreamClient::from_config(&config.upstream)?,
            forward_preflight: config.cors.forward_preflight,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Every path relays; only the `url` parameter selects the target.
    /// The CORS headers override anything the upstream sent.
    pub fn build_router(state: RelayState) -> Router {
        let [allow_origin, allow_methods, allow_headers, expose_headers] = cors_headers();

        Router::new()
            .route("/{*path}", any(relay_handler))
            .route("/", any(relay_handler))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(SetResponseHeaderLayer::overriding(allow_origin.0, allow_origin.1))
                    .layer(SetResponseHeaderLayer::overriding(allow_methods.0, allow_methods.1))
                    .layer(SetResponseHeaderLayer::overriding(allow_headers.0, allow_headers.1))
                    .layer(SetResponseHeaderLayer::overriding(expose_headers.0, expose_headers.1)),
            )
    }

    /// A clone of the router, for driving it without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. In-flight requests are allowed to finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            timeout_secs = self.config.upstream.timeout_secs,
            max_redirects = self.config.upstream.max_redirects,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
