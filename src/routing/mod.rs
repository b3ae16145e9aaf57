//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (ordered matcher scan)
//!     → matcher.rs (evaluate one matcher)
//!     → Return: classified RouteKind (Fallback when nothing matches)
//!
//! Route compilation (at startup):
//!     rewrite aliases from config
//!     → build matcher list in priority order
//!     → freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Matchers compiled at startup, immutable at runtime
//! - No regex in the hot path (exact and prefix matching only)
//! - Deterministic: same path always classifies the same way
//! - First match wins, fallback is explicit

pub mod matcher;
pub mod router;

pub use matcher::RouteKind;
pub use router::RouteTable;
