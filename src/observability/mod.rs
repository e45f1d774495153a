//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup   → logging.rs (tracing subscriber, env filter)
//! startup   → metrics.rs (optional Prometheus listener)
//! requests  → metrics.rs (counters, latency histogram)
//!           → tower_http TraceLayer (DEBUG spans per request)
//! ```
//!
//! # Design Decisions
//! - Per-request events stay at DEBUG; the default level logs only
//!   startup, shutdown and fatal errors
//! - Metrics are recorded unconditionally and are no-ops without an exporter

pub mod logging;
pub mod metrics;
