//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS and trace layers)
//!     → relay.rs (the single handler)
//!         → request.rs (target extraction, outbound construction)
//!         → headers.rs (hop-by-hop and Host filtering)
//!         → upstream client (dispatch)
//!         → response.rs (status, filtered headers, streamed body)
//!     → Send to client
//! ```

pub mod headers;
pub mod relay;
pub mod request;
pub mod response;
pub mod server;

pub use relay::{relay_handler, RelayState};
pub use request::Target;
pub use server::RelayServer;
