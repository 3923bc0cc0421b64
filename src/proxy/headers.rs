//! Header policy for relayed calls
//!
//! Every response leaving the gateway carries the same cross-origin grant,
//! whether it came from the upstream, a preflight or a fallback path.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    CONTENT_TYPE,
};
use axum::http::{HeaderMap, HeaderValue, Method};

/// Origin granted on every response
pub const ALLOWED_ORIGIN: &str = "*";

/// Methods the gateway accepts, the preflight method included
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Request headers a cross-origin caller may send
pub const ALLOWED_HEADERS: &str = "Content-Type";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Insert the cross-origin grant into a response header map
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(ALLOWED_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
}

/// Headers attached to every response returned to the caller
pub fn relay_response_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    apply_cors_headers(&mut headers);
    headers
}

/// Headers sent on every outbound upstream request
///
/// Caller headers are not copied; the upstream only ever sees a JSON
/// content-type.
pub fn build_outbound_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers
}

/// Whether the method is the cross-origin preflight call
pub fn is_preflight(method: &Method) -> bool {
    method == Method::OPTIONS
}

/// Whether a request with this method must be sent without a body
pub fn is_read_only(method: &Method) -> bool {
    method == Method::GET || method == Method::HEAD
}
