//! Permissive CORS handling for browser-facing functions.
//!
//! Every response is tagged with `Access-Control-Allow-Origin: *`. Preflight
//! replies are explicit per function, since each advertises its own method and
//! header lists.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tower_http::set_header::SetResponseHeaderLayer;

/// How long browsers may cache a preflight answer, in seconds.
pub const PREFLIGHT_MAX_AGE: u32 = 86400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allow_methods: &'static str,
    pub allow_headers: &'static str,
    pub max_age: u32,
}

impl CorsPolicy {
    pub const fn new(allow_methods: &'static str, allow_headers: &'static str) -> Self {
        Self {
            allow_methods,
            allow_headers,
            max_age: PREFLIGHT_MAX_AGE,
        }
    }

    /// 200 with the CORS headers and an empty body.
    pub fn preflight(&self) -> Response {
        (
            StatusCode::OK,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
                (
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    self.allow_methods.to_string(),
                ),
                (
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    self.allow_headers.to_string(),
                ),
                (header::ACCESS_CONTROL_MAX_AGE, self.max_age.to_string()),
            ],
        )
            .into_response()
    }
}

/// Layer stamping `Access-Control-Allow-Origin: *` on every response.
pub fn allow_any_origin() -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    )
}
