//! Gateway error taxonomy.
//!
//! Each variant maps to exactly one HTTP status at the boundary, so every
//! failure mode produces a deterministic response instead of a collapsed
//! generic error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Rejection message returned for origins not on the allowlist.
pub const REJECTION_MESSAGE: &str =
    "Image compression and CDN acceleration are not available for this origin";

/// Per-request failure. Terminal: nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Source hostname failed the allowlist check. No outbound request
    /// was made.
    #[error("origin `{host}` is not on the allowlist")]
    OriginRejected { host: String },

    /// Source URL could not be parsed or has no hostname. Fails before
    /// any outbound fetch.
    #[error("invalid source URL `{url}`: {reason}")]
    InvalidSource { url: String, reason: String },

    /// Reverse-CDN alias matched no configured rewrite rule.
    #[error("unrecognized alias `{alias}`")]
    UnknownAlias { alias: String },

    /// Transport-level failure talking to the backend or origin. Non-2xx
    /// upstream statuses are not errors; they are forwarded as-is.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl GatewayError {
    /// Deterministic status mapping for the taxonomy.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::OriginRejected { .. } => StatusCode::FORBIDDEN,
            Self::InvalidSource { .. } | Self::UnknownAlias { .. } => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::OriginRejected { host } => {
                tracing::warn!(host = %host, "Origin rejected by allowlist");
                REJECTION_MESSAGE.to_string()
            }
            Self::InvalidSource { url, reason } => {
                tracing::warn!(url = %url, reason = %reason, "Invalid source URL");
                "Invalid image source URL".to_string()
            }
            Self::UnknownAlias { alias } => {
                tracing::warn!(alias = %alias, "Unrecognized reverse-CDN alias");
                "Unrecognized path alias".to_string()
            }
            Self::Upstream(e) => {
                tracing::error!(error = %e, "Upstream fetch failed");
                "Error fetching image".to_string()
            }
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_deterministic() {
        let rejected = GatewayError::OriginRejected {
            host: "other.com".into(),
        };
        assert_eq!(rejected.status(), StatusCode::FORBIDDEN);

        let invalid = GatewayError::InvalidSource {
            url: "not a url".into(),
            reason: "empty host".into(),
        };
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let alias = GatewayError::UnknownAlias { alias: "x".into() };
        assert_eq!(alias.status(), StatusCode::BAD_REQUEST);
    }
}
