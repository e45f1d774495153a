//! The process-wide outbound HTTP client.

use std::time::Duration;

use axum::http::Method;
use tokio::time;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::RelayError;
use crate::upstream::redirect::redirect_policy;

/// Shared handle to the outbound client.
///
/// Cloning is cheap: `reqwest::Client` is reference counted and the
/// settings never change after construction.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl UpstreamClient {
    /// Build the client from configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().redirect(redirect_policy(config.max_redirects));
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Start an outbound request with no body. The only header set is
    /// `Authorization`, when the URL carries `user:pass@`.
    pub fn build_request(&self, method: Method, url: Url) -> Result<reqwest::Request, RelayError> {
        self.client
            .request(method, url)
            .build()
            .map_err(RelayError::BuildRequest)
    }

    /// Send `request` once and wait for the response headers.
    pub async fn dispatch(&self, request: reqwest::Request) -> Result<reqwest::Response, RelayError> {
        let url = request.url().clone();

        match time::timeout(self.timeout, self.client.execute(request)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                tracing::debug!(target_url = %url, error = %e, "Upstream request failed");
                Err(RelayError::Upstream(e))
            }
            Err(_) => {
                tracing::debug!(target_url = %url, timeout = ?self.timeout, "Upstream request timed out");
                Err(RelayError::Timeout(self.timeout))
            }
        }
    }
}
