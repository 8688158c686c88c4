//! Host and port resolution from a host header.

use crate::constants::defaults;

/// Host and port taken from a host header.
///
/// Either side may be unknown on its own: a header such as `example.com:abc`
/// still yields the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostPort {
    /// Host name, without any port suffix.
    pub host: Option<String>,
    /// Explicit port from the header, or the default port of the scheme.
    pub port: Option<i32>,
}

/// Split a host header into host and port.
///
/// The header is split on the first `:` only. An explicit port wins; without one
/// the port defaults to 443 for `https`, 80 for `http` and is unknown for any
/// other scheme. Whitespace around the port is ignored. A port that does not
/// parse as an integer is dropped while the host is kept.
///
/// IPv6 literals are not recognized: for `[::1]:8080` everything after the first
/// colon is treated as the port and fails to parse, leaving host `[` and no port.
///
/// ```
/// use lambda_otel_http_attributes::{resolve_host_port, HostPort};
///
/// let resolved = resolve_host_port(Some("https"), Some("api.example.com"));
/// assert_eq!(resolved.host.as_deref(), Some("api.example.com"));
/// assert_eq!(resolved.port, Some(443));
///
/// assert_eq!(resolve_host_port(Some("https"), None), HostPort::default());
/// ```
pub fn resolve_host_port(scheme: Option<&str>, host_header: Option<&str>) -> HostPort {
    let Some(header) = host_header else {
        return HostPort::default();
    };

    match header.split_once(':') {
        Some((host, port)) => HostPort {
            host: Some(host.to_string()),
            port: port.trim().parse().ok(),
        },
        None => HostPort {
            host: Some(header.to_string()),
            port: default_port(scheme),
        },
    }
}

/// Well-known port for a URL scheme.
pub fn default_port(scheme: Option<&str>) -> Option<i32> {
    match scheme {
        Some("https") => Some(defaults::HTTPS_PORT),
        Some("http") => Some(defaults::HTTP_PORT),
        _ => None,
    }
}
