//! Image gateway library.
//!
//! An HTTP gateway that accepts image requests, rewrites and validates the
//! source URL, enforces a domain allowlist, and forwards the request to an
//! imgproxy-compatible transformation backend, streaming the result back
//! with adjusted response headers.

pub mod config;
pub mod error;
pub mod http;
pub mod rewrite;
pub mod routing;
pub mod security;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
