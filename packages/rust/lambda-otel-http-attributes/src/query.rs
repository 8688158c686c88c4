//! Query string reconstruction for the supported gateway events.
//!
//! REST API and ALB events only carry parsed query parameters, so the query
//! string is rebuilt from them. HTTP API v2 events carry the raw query string.
//! Every function returns either an empty string or a string starting with `?`.

use aws_lambda_events::alb::AlbTargetGroupRequest;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayV2httpRequest};
use query_map::QueryMap;
use std::collections::BTreeSet;

/// Form-encode a query component.
///
/// Spaces become `+`, escapes use lowercase hex, and only ASCII letters, digits
/// and `-_.!*()` are left as is (so `~` is escaped).
///
/// ```
/// use lambda_otel_http_attributes::query::form_encode;
///
/// assert_eq!(form_encode("a b"), "a+b");
/// assert_eq!(form_encode("x/y~!"), "x%2fy%7e!");
/// ```
pub fn form_encode(input: &str) -> String {
    let encoded = urlencoding::encode(input);
    let mut output = String::with_capacity(encoded.len());
    let mut rest = encoded.as_ref();

    // urlencoding leaves `-_.~` and alphanumerics alone and escapes everything
    // else as `%XX` with uppercase hex.
    while let Some(first) = rest.chars().next() {
        match first {
            '%' if rest.len() >= 3 => {
                match &rest[1..3] {
                    "20" => output.push('+'),
                    "21" => output.push('!'),
                    "28" => output.push('('),
                    "29" => output.push(')'),
                    "2A" => output.push('*'),
                    hex => {
                        output.push('%');
                        output.push_str(&hex.to_ascii_lowercase());
                    }
                }
                rest = &rest[3..];
            }
            '~' => {
                output.push_str("%7e");
                rest = &rest[1..];
            }
            other => {
                output.push(other);
                rest = &rest[other.len_utf8()..];
            }
        }
    }
    output
}

/// Join `key=value` pairs into a query string, form-encoding keys and values.
///
/// ```
/// use lambda_otel_http_attributes::query::encode_query;
///
/// assert_eq!(encode_query([("a", "1"), ("a", "2"), ("b", "x")]), "?a=1&a=2&b=x");
/// assert_eq!(encode_query([("q", "hello world")]), "?q=hello+world");
/// assert_eq!(encode_query([]), "");
/// ```
pub fn encode_query<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut query = String::new();
    for (key, value) in pairs {
        query.push(if query.is_empty() { '?' } else { '&' });
        query.push_str(&form_encode(key));
        query.push('=');
        query.push_str(&form_encode(value));
    }
    query
}

/// Prefix an already encoded query string with `?`, or return an empty string.
pub fn raw_query(raw: Option<&str>) -> String {
    match raw {
        Some(raw) if !raw.is_empty() => format!("?{}", raw),
        _ => String::new(),
    }
}

// QueryMap is backed by a HashMap; sort keys so the output is stable.
fn sorted_keys(params: &QueryMap) -> BTreeSet<&str> {
    params.iter().map(|(key, _)| key).collect()
}

/// Every value of every key, keys in sorted order, values in arrival order.
pub fn multi_value_query(params: &QueryMap) -> String {
    encode_query(sorted_keys(params).into_iter().flat_map(|key| {
        params
            .all(key)
            .unwrap_or_default()
            .into_iter()
            .map(move |value| (key, value))
    }))
}

/// One value per key, keys in sorted order.
pub fn single_value_query(params: &QueryMap) -> String {
    encode_query(
        sorted_keys(params)
            .into_iter()
            .filter_map(|key| params.first(key).map(|value| (key, value))),
    )
}

/// Query string of a REST API (v1) request, from its multi-value parameters.
pub fn rest_api_query(request: &ApiGatewayProxyRequest) -> String {
    multi_value_query(&request.multi_value_query_string_parameters)
}

/// Query string of an HTTP API (v2) request, from its raw query string.
pub fn http_api_query(request: &ApiGatewayV2httpRequest) -> String {
    raw_query(request.raw_query_string.as_deref())
}

/// Query string of an ALB request.
///
/// Depending on whether multi-value headers are enabled on the target group,
/// ALB fills either the multi-value or the single-value parameters. The
/// multi-value map is preferred; the two are never combined.
pub fn load_balancer_query(request: &AlbTargetGroupRequest) -> String {
    if !request.multi_value_query_string_parameters.is_empty() {
        multi_value_query(&request.multi_value_query_string_parameters)
    } else if !request.query_string_parameters.is_empty() {
        single_value_query(&request.query_string_parameters)
    } else {
        String::new()
    }
}
