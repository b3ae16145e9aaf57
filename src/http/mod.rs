//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (request ID injection)
//!     → [routing layer classifies path]
//!     → proxy.rs (allowlist check, outbound fetch, header rewrite)
//!     → Send to client
//! ```

pub mod proxy;
pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
