//! Constants for the lambda-otel-http-attributes package.
//!
//! Attribute names, header names and environment variables live here so the
//! extractor and the response writer agree on a single source of truth.

/// Span attribute names emitted by the extractor.
///
/// Stable names come from `opentelemetry-semantic-conventions`. The legacy names
/// were removed from the current conventions but are still emitted next to
/// their replacements.
pub mod attributes {
    pub use opentelemetry_semantic_conventions::attribute::{
        HTTP_REQUEST_METHOD, HTTP_RESPONSE_STATUS_CODE, SERVER_ADDRESS, SERVER_PORT, URL_PATH,
        URL_QUERY, URL_SCHEME,
    };

    /// Legacy name for the URL scheme, superseded by `url.scheme`.
    pub const HTTP_SCHEME: &str = "http.scheme";

    /// Legacy request target (path and query), no current equivalent.
    pub const HTTP_TARGET: &str = "http.target";

    /// Legacy name for the response status code, superseded by `http.response.status_code`.
    pub const HTTP_STATUS_CODE: &str = "http.status_code";

    /// Names the scheme is written under. Both are always emitted together.
    pub const SCHEME_ATTRIBUTES: [&str; 2] = [HTTP_SCHEME, URL_SCHEME];

    /// Names the response status code is written under. Both are always emitted together.
    pub const STATUS_CODE_ATTRIBUTES: [&str; 2] = [HTTP_STATUS_CODE, HTTP_RESPONSE_STATUS_CODE];
}

/// Environment variable names for configuration.
pub mod env_vars {
    /// Header carrying the client-facing scheme, as set by the fronting proxy.
    pub const FORWARDED_PROTO_HEADER: &str = "LAMBDA_HTTP_ATTRIBUTES_FORWARDED_PROTO_HEADER";

    /// Header carrying the requested host and optional port.
    pub const HOST_HEADER: &str = "LAMBDA_HTTP_ATTRIBUTES_HOST_HEADER";
}

/// Default values for configuration parameters.
pub mod defaults {
    /// Default forwarded-protocol header.
    pub const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

    /// Default host header.
    pub const HOST_HEADER: &str = "host";

    /// Port assumed for `https` when the host header has none.
    pub const HTTPS_PORT: i32 = 443;

    /// Port assumed for `http` when the host header has none.
    pub const HTTP_PORT: i32 = 80;
}
