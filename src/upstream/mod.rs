//! Outbound client subsystem.
//!
//! # Data Flow
//! ```text
//! startup
//!     → client.rs (build one reqwest::Client from UpstreamConfig)
//!     → shared read-only by every request task
//!
//! per request
//!     → client.rs dispatch (single attempt, dispatch ceiling)
//!     → redirect.rs policy decides follow / stop at each 3xx
//! ```
//!
//! # Design Decisions
//! - No retries: one attempt per inbound request
//! - The ceiling covers headers only; the body may stream indefinitely
//! - Exhausting the redirect budget is not an error

pub mod client;
pub mod redirect;

pub use client::UpstreamClient;
pub use redirect::redirect_policy;
