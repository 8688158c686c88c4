//! Header lookup for the supported gateway events.
//!
//! Only the last value of a header is ever used: proxies append to forwarded
//! headers, so the last occurrence was written by the hop closest to Lambda.

use aws_lambda_events::http::HeaderMap;

/// Last value of `name` in `headers`. Lookup is case-insensitive.
///
/// A value that is not valid UTF-8 is treated as absent.
pub(crate) fn last_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(name)
        .iter()
        .last()
        .and_then(|value| value.to_str().ok())
}

/// Lookup for events carrying both `multiValueHeaders` and `headers`
/// (REST API and ALB). The multi-value map wins when it has the header.
pub(crate) fn last_multi_value<'a>(
    multi_value_headers: &'a HeaderMap,
    headers: &'a HeaderMap,
    name: &str,
) -> Option<&'a str> {
    if multi_value_headers.contains_key(name) {
        last_value(multi_value_headers, name)
    } else {
        last_value(headers, name)
    }
}

/// Lookup for HTTP API v2 events, where repeated headers arrive joined by commas.
pub(crate) fn last_comma_separated<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    last_value(headers, name)
        .and_then(|value| value.rsplit(',').next())
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_lambda_events::http::HeaderValue;

    fn headers(entries: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in entries {
            map.append(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_last_value_uses_last_occurrence() {
        let map = headers(&[("x-forwarded-proto", "http"), ("x-forwarded-proto", "https")]);
        assert_eq!(last_value(&map, "x-forwarded-proto"), Some("https"));
        assert_eq!(last_value(&map, "X-Forwarded-Proto"), Some("https"));
        assert_eq!(last_value(&map, "host"), None);
    }

    #[test]
    fn test_last_value_skips_non_utf8() {
        let mut map = HeaderMap::new();
        map.insert(
            "host",
            HeaderValue::from_bytes(&[0xe4, 0x61]).expect("opaque header value"),
        );
        assert_eq!(last_value(&map, "host"), None);
    }

    #[test]
    fn test_multi_value_headers_take_precedence() {
        let multi = headers(&[("host", "first.example.com"), ("host", "last.example.com")]);
        let single = headers(&[("host", "single.example.com")]);
        assert_eq!(
            last_multi_value(&multi, &single, "host"),
            Some("last.example.com")
        );

        let empty = HeaderMap::new();
        assert_eq!(
            last_multi_value(&empty, &single, "host"),
            Some("single.example.com")
        );
        assert_eq!(last_multi_value(&empty, &empty, "host"), None);
    }

    #[test]
    fn test_comma_separated_values() {
        let map = headers(&[("x-forwarded-proto", "http, https")]);
        assert_eq!(last_comma_separated(&map, "x-forwarded-proto"), Some("https"));

        let map = headers(&[("host", "api.example.com")]);
        assert_eq!(last_comma_separated(&map, "host"), Some("api.example.com"));

        assert_eq!(last_comma_separated(&HeaderMap::new(), "host"), None);
    }
}
