//! Origin access control.
//!
//! # Design Decisions
//! - Patterns parsed once at startup, immutable at runtime
//! - Fail closed: a hostname matching no pattern is rejected before any
//!   outbound request is made

pub mod allowlist;

pub use allowlist::Allowlist;
