//! Transform-and-serve: the outbound leg of the gateway.
//!
//! # Responsibilities
//! - Extract and validate the source hostname before any outbound fetch
//! - Build the transformation backend URL
//! - Stream upstream bodies through without buffering
//! - Rewrite response headers (hop-by-hop stripped, `Server` overridden)
//!
//! # Design Decisions
//! - Allowlist failures are terminal and make no outbound request
//! - Non-2xx upstream statuses are forwarded as-is; only transport-level
//!   failures map to an error response
//! - Exactly one outbound attempt per request, no retries

use axum::body::Body;
use axum::http::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CACHE_CONTROL, SERVER};
use axum::response::Response;
use serde::Deserialize;
use url::Url;

use crate::error::GatewayError;
use crate::http::server::AppState;

/// Fixed identifying string stamped on every proxied response.
pub const SERVER_HEADER_VALUE: &str = "NextImageTransformation";

/// Outbound Accept header: prefer modern formats, take anything.
pub const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/apng,*/*";

/// Cache header attached to unmodified origin passthroughs.
pub const LONG_LIVED_CACHE: &str = "public, max-age=31536000";

/// imgproxy processing preset.
const PRESET: &str = "pr:sharp";

/// Hop-by-hop headers never forwarded to the client.
const HOP_BY_HOP: [HeaderName; 4] = [
    HeaderName::from_static("connection"),
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("transfer-encoding"),
    HeaderName::from_static("upgrade"),
];

/// Requested transformation parameters.
///
/// Width/height of 0 mean "no resize"; quality defaults to 75.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    pub width: u32,
    pub height: u32,
    pub quality: u32,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            quality: 75,
        }
    }
}

impl TransformParams {
    /// True when the caller asked for no resizing at all.
    pub fn no_resize(&self) -> bool {
        self.width == 0 && self.height == 0
    }
}

/// Extract the hostname of a source URL.
///
/// Lenient about a missing scheme: `example.com/pic.jpg` is parsed with an
/// assumed `https://` for hostname extraction only; the source string is
/// forwarded to the backend verbatim. A source with no extractable
/// hostname fails here, before any outbound fetch.
pub fn source_hostname(source: &str) -> Result<String, GatewayError> {
    let parsed = match Url::parse(source) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{source}"))
            .map_err(|e| GatewayError::InvalidSource {
                url: source.to_string(),
                reason: e.to_string(),
            })?,
        Err(e) => {
            return Err(GatewayError::InvalidSource {
                url: source.to_string(),
                reason: e.to_string(),
            })
        }
    };

    parsed
        .host_str()
        .map(str::to_owned)
        .ok_or_else(|| GatewayError::InvalidSource {
            url: source.to_string(),
            reason: "no hostname".to_string(),
        })
}

/// Build the transformation backend URL for a source and parameter set.
pub fn backend_url(base_url: &str, source: &str, params: &TransformParams) -> String {
    format!(
        "{}/{}/resize:fill:{}:{}/q:{}/plain/{}",
        base_url.trim_end_matches('/'),
        PRESET,
        params.width,
        params.height,
        params.quality,
        source
    )
}

/// Forward a validated source through the transformation backend.
pub async fn transform(
    state: &AppState,
    source: &str,
    params: &TransformParams,
) -> Result<Response, GatewayError> {
    check_origin(state, source)?;

    let url = backend_url(&state.config.upstream.base_url, source, params);
    tracing::debug!(backend_url = %url, "Forwarding to transformation backend");

    let upstream = state
        .client
        .get(&url)
        .header(ACCEPT, IMAGE_ACCEPT)
        .send()
        .await?;

    Ok(forward(upstream, None))
}

/// Serve a validated origin unmodified, with long-lived cache headers.
pub async fn passthrough(state: &AppState, origin: &str) -> Result<Response, GatewayError> {
    check_origin(state, origin)?;

    tracing::debug!(origin = %origin, "Streaming origin without transformation");

    let upstream = state
        .client
        .get(origin)
        .header(ACCEPT, IMAGE_ACCEPT)
        .send()
        .await?;

    Ok(forward(upstream, Some(LONG_LIVED_CACHE)))
}

fn check_origin(state: &AppState, source: &str) -> Result<(), GatewayError> {
    let host = source_hostname(source)?;
    if !state.allowlist.is_allowed(&host) {
        return Err(GatewayError::OriginRejected { host });
    }
    Ok(())
}

/// Relay an upstream response: copy headers minus hop-by-hop ones,
/// override `Server`, stream the body through unbuffered.
fn forward(upstream: reqwest::Response, cache_control: Option<&'static str>) -> Response {
    let status = upstream.status();

    let mut headers = HeaderMap::with_capacity(upstream.headers().len() + 2);
    for (name, value) in upstream.headers() {
        if HOP_BY_HOP.contains(name) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers.insert(SERVER, HeaderValue::from_static(SERVER_HEADER_VALUE));
    if let Some(cache) = cache_control {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache));
    }

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
