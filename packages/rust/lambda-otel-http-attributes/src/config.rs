use crate::constants::{defaults, env_vars};
use aws_lambda_events::http::HeaderName;
use bon::Builder;
use std::env;
use tracing::warn;

/// Header names consulted when extracting request attributes.
///
/// Gateways fronted by another proxy sometimes forward the scheme or host under
/// a different header (for example CloudFront's `cloudfront-forwarded-proto`).
///
/// # Configuration
///
/// The header names can be configured in two ways:
///
/// 1. Using environment variables:
///    - `LAMBDA_HTTP_ATTRIBUTES_FORWARDED_PROTO_HEADER` (default `x-forwarded-proto`)
///    - `LAMBDA_HTTP_ATTRIBUTES_HOST_HEADER` (default `host`)
///
/// 2. Programmatically:
///    ```
///    use lambda_otel_http_attributes::ExtractorConfig;
///
///    let config = ExtractorConfig::builder()
///        .forwarded_proto_header("cloudfront-forwarded-proto")
///        .build();
///    assert_eq!(config.host_header, "host");
///    ```
///
/// Environment variables take precedence over programmatic configuration when
/// the config is passed through [`ExtractorConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ExtractorConfig {
    /// Header holding the original client-facing scheme.
    #[builder(into, default = defaults::FORWARDED_PROTO_HEADER.to_string())]
    pub forwarded_proto_header: String,

    /// Header holding the requested host, optionally followed by `:port`.
    #[builder(into, default = defaults::HOST_HEADER.to_string())]
    pub host_header: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            forwarded_proto_header: defaults::FORWARDED_PROTO_HEADER.to_string(),
            host_header: defaults::HOST_HEADER.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Apply environment overrides on top of this configuration.
    ///
    /// Overrides are trimmed and lowercased. A value that is not a valid header
    /// name is logged and ignored.
    pub fn resolve(self) -> Self {
        Self {
            forwarded_proto_header: header_override(
                env_vars::FORWARDED_PROTO_HEADER,
                self.forwarded_proto_header,
            ),
            host_header: header_override(env_vars::HOST_HEADER, self.host_header),
        }
    }

    /// Default configuration with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().resolve()
    }
}

fn header_override(var: &str, configured: String) -> String {
    let Ok(value) = env::var(var) else {
        return configured;
    };

    let name = value.trim().to_lowercase();
    if HeaderName::from_bytes(name.as_bytes()).is_ok() {
        name
    } else {
        warn!(
            variable = var,
            value = value.as_str(),
            "invalid header name in environment, using {}",
            configured
        );
        configured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_env(var: &str, value: Option<&str>) {
        match value {
            Some(v) => env::set_var(var, v),
            None => env::remove_var(var),
        }
    }

    fn clear_env() {
        set_env(env_vars::FORWARDED_PROTO_HEADER, None);
        set_env(env_vars::HOST_HEADER, None);
    }

    #[test]
    fn test_builder_defaults() {
        let config = ExtractorConfig::builder().build();
        assert_eq!(config, ExtractorConfig::default());
        assert_eq!(config.forwarded_proto_header, "x-forwarded-proto");
        assert_eq!(config.host_header, "host");
    }

    #[test]
    #[serial]
    fn test_resolve_without_env_keeps_config() {
        clear_env();
        let config = ExtractorConfig::builder()
            .host_header("x-forwarded-host")
            .build()
            .resolve();
        assert_eq!(config.host_header, "x-forwarded-host");
        assert_eq!(config.forwarded_proto_header, "x-forwarded-proto");
    }

    #[test]
    #[serial]
    fn test_env_takes_precedence() {
        clear_env();
        set_env(
            env_vars::FORWARDED_PROTO_HEADER,
            Some("  CloudFront-Forwarded-Proto "),
        );

        let config = ExtractorConfig::builder()
            .forwarded_proto_header("x-scheme")
            .build()
            .resolve();
        assert_eq!(config.forwarded_proto_header, "cloudfront-forwarded-proto");
        assert_eq!(config.host_header, "host");

        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_env_values_are_ignored() {
        clear_env();

        for invalid in ["", "   ", "bad header", "host:"] {
            set_env(env_vars::HOST_HEADER, Some(invalid));
            let config = ExtractorConfig::from_env();
            assert_eq!(config.host_header, "host", "Failed for env value: {:?}", invalid);
        }

        clear_env();
    }
}
