//! Configuration validation.
//!
//! Pure function over a parsed [`RelayConfig`]; returns every problem found
//! rather than stopping at the first.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RelayConfig;

/// Upper bound on configurable redirect hops.
pub const MAX_REDIRECT_LIMIT: usize = 50;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("upstream.connect_timeout_secs ({connect}) exceeds upstream.timeout_secs ({total})")]
    ConnectExceedsTotal { connect: u64, total: u64 },
    #[error("upstream.max_redirects ({0}) exceeds {limit}", limit = MAX_REDIRECT_LIMIT)]
    TooManyRedirects(usize),
    #[error("observability.log_level: unknown level '{0}'")]
    UnknownLogLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let upstream = &config.upstream;
    if upstream.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "upstream.timeout_secs" });
    }
    match upstream.connect_timeout_secs {
        Some(0) => errors.push(ValidationError::Zero { field: "upstream.connect_timeout_secs" }),
        Some(connect) if upstream.timeout_secs > 0 && connect > upstream.timeout_secs => {
            errors.push(ValidationError::ConnectExceedsTotal {
                connect,
                total: upstream.timeout_secs,
            });
        }
        _ => {}
    }
    if upstream.max_redirects > MAX_REDIRECT_LIMIT {
        errors.push(ValidationError::TooManyRedirects(upstream.max_redirects));
    }

    let observability = &config.observability;
    if !LOG_LEVELS.contains(&observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(observability.log_level.clone()));
    }
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
