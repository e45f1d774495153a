//! CORS relay library.
//!
//! Forwards `/?url=<target>` to the target and streams the answer back with
//! permissive CORS headers, so browser code can reach third-party origins.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod upstream;

pub use config::RelayConfig;
pub use error::RelayError;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
