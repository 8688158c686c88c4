//! HTTP attribute extraction for gateway requests and responses.
//!
//! # Request attributes
//!
//! For every supported request, in this order and only when the source value is present:
//! - `http.scheme` and `url.scheme`: last value of the forwarded-protocol header
//! - `http.target`: path followed by the query string
//! - `url.path`: request path, empty when the event has none
//! - `url.query`: query string starting with `?`, empty when there is none
//! - `http.request.method`: HTTP method
//! - `server.address`: host from the host header
//! - `server.port`: always listed, from the host header or the scheme's default port
//!
//! # Response attributes
//!
//! The status code is written as both `http.status_code` and
//! `http.response.status_code`.

use crate::attributes::{AttributeSink, HttpAttributes};
use crate::config::ExtractorConfig;
use crate::constants::attributes::{
    HTTP_REQUEST_METHOD, HTTP_TARGET, SCHEME_ATTRIBUTES, SERVER_ADDRESS, SERVER_PORT,
    STATUS_CODE_ATTRIBUTES, URL_PATH, URL_QUERY,
};
use crate::events::{GatewayRequest, HttpRequestEvent, HttpResponseEvent};
use crate::headers;
use crate::host::{resolve_host_port, HostPort};
use crate::query;
use aws_lambda_events::alb::AlbTargetGroupRequest;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayV2httpRequest};
use aws_lambda_events::http::Method;
use opentelemetry::Value;
use serde_json::Value as JsonValue;
use tracing::debug;

/// Request fields that feed the attribute list, read from one of the gateway events.
struct RequestFields<'a> {
    scheme: Option<&'a str>,
    path: &'a str,
    query: String,
    method: Option<&'a str>,
    host_header: Option<&'a str>,
}

impl RequestFields<'_> {
    fn into_attributes(self) -> HttpAttributes {
        let target = format!("{}{}", self.path, self.query);
        let HostPort { host, port } = resolve_host_port(self.scheme, self.host_header);

        let mut attributes = HttpAttributes::default();
        attributes.push_present(&SCHEME_ATTRIBUTES, self.scheme.map(str::to_string));
        attributes.push_present(&[HTTP_TARGET], Some(target));
        attributes.push_present(&[URL_PATH], Some(self.path.to_string()));
        attributes.push_present(&[URL_QUERY], Some(self.query));
        attributes.push_present(&[HTTP_REQUEST_METHOD], self.method.map(str::to_string));
        attributes.push_present(&[SERVER_ADDRESS], host);
        // Listed even when unknown, unlike the attributes above.
        attributes.push(SERVER_PORT, port.map(|port| Value::I64(i64::from(port))));
        attributes
    }
}

/// Extracts HTTP span attributes using a given [`ExtractorConfig`].
///
/// # Examples
///
/// ```
/// use aws_lambda_events::apigw::ApiGatewayV2httpRequest;
/// use aws_lambda_events::http::HeaderValue;
/// use lambda_otel_http_attributes::{HttpAttributesExtractor, HttpRequestEvent};
/// use opentelemetry::Value;
///
/// let mut request = ApiGatewayV2httpRequest::default();
/// request.raw_path = Some("/users".to_string());
/// request.raw_query_string = Some("page=2".to_string());
/// request
///     .headers
///     .insert("host", HeaderValue::from_static("api.example.com"));
/// request
///     .headers
///     .insert("x-forwarded-proto", HeaderValue::from_static("https"));
///
/// let extractor = HttpAttributesExtractor::default();
/// let attributes = extractor.extract_request_attributes(HttpRequestEvent::from(&request));
///
/// assert_eq!(attributes.get("http.target"), Some(&Value::from("/users?page=2")));
/// assert_eq!(attributes.get("server.port"), Some(&Value::I64(443)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct HttpAttributesExtractor {
    config: ExtractorConfig,
}

impl HttpAttributesExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extractor using the default header names with environment overrides applied.
    pub fn from_env() -> Self {
        Self::new(ExtractorConfig::from_env())
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Ordered HTTP attributes of a request. [`HttpRequestEvent::Other`] yields none.
    pub fn extract_request_attributes(&self, event: HttpRequestEvent<'_>) -> HttpAttributes {
        let fields = match event {
            HttpRequestEvent::RestApi(request) => self.rest_api_fields(request),
            HttpRequestEvent::HttpApi(request) => self.http_api_fields(request),
            HttpRequestEvent::LoadBalancer(request) => self.load_balancer_fields(request),
            HttpRequestEvent::Other => {
                debug!("skipping HTTP attributes for unrecognized request");
                return HttpAttributes::default();
            }
        };
        fields.into_attributes()
    }

    /// Ordered HTTP attributes of a raw Lambda payload.
    ///
    /// Payloads that are not a known gateway request yield no attributes.
    pub fn extract_request_attributes_from_json(&self, payload: &JsonValue) -> HttpAttributes {
        match GatewayRequest::from_json(payload.clone()) {
            Ok(request) => self.extract_request_attributes(request.as_event()),
            Err(error) => {
                debug!(error = %error, "skipping HTTP attributes for JSON payload");
                HttpAttributes::default()
            }
        }
    }

    fn rest_api_fields<'a>(&self, request: &'a ApiGatewayProxyRequest) -> RequestFields<'a> {
        let header = |name: &str| {
            headers::last_multi_value(&request.multi_value_headers, &request.headers, name)
        };

        RequestFields {
            scheme: header(self.config.forwarded_proto_header.as_str()),
            path: request
                .request_context
                .path
                .as_deref()
                .or(request.path.as_deref())
                .unwrap_or_default(),
            query: query::rest_api_query(request),
            method: Some(rest_api_method(request)),
            host_header: header(self.config.host_header.as_str()),
        }
    }

    fn http_api_fields<'a>(&self, request: &'a ApiGatewayV2httpRequest) -> RequestFields<'a> {
        let header = |name: &str| headers::last_comma_separated(&request.headers, name);

        RequestFields {
            scheme: header(self.config.forwarded_proto_header.as_str()),
            path: request.raw_path.as_deref().unwrap_or_default(),
            query: query::http_api_query(request),
            method: Some(request.request_context.http.method.as_str()),
            host_header: header(self.config.host_header.as_str()),
        }
    }

    fn load_balancer_fields<'a>(&self, request: &'a AlbTargetGroupRequest) -> RequestFields<'a> {
        let header = |name: &str| {
            headers::last_multi_value(&request.multi_value_headers, &request.headers, name)
        };

        RequestFields {
            scheme: header(self.config.forwarded_proto_header.as_str()),
            path: request.path.as_deref().unwrap_or_default(),
            query: query::load_balancer_query(request),
            method: Some(request.http_method.as_str()),
            host_header: header(self.config.host_header.as_str()),
        }
    }
}

// The request context method wins. A request built without a context holds the
// default method there, in which case the top-level method is used.
// `http::Method` is never absent in these event types, so a request without any
// method reports `GET` on every variant.
fn rest_api_method(request: &ApiGatewayProxyRequest) -> &str {
    let context_method = &request.request_context.http_method;
    if *context_method == Method::default() && request.http_method != Method::default() {
        request.http_method.as_str()
    } else {
        context_method.as_str()
    }
}

/// Ordered HTTP attributes of a request, using the default header names.
///
/// ```
/// use aws_lambda_events::alb::AlbTargetGroupRequest;
/// use lambda_otel_http_attributes::{extract_request_attributes, HttpRequestEvent};
///
/// let request = AlbTargetGroupRequest::default();
/// let attributes = extract_request_attributes(HttpRequestEvent::from(&request));
/// assert!(attributes.contains_key("server.port"));
///
/// assert!(extract_request_attributes(HttpRequestEvent::Other).is_empty());
/// ```
pub fn extract_request_attributes(event: HttpRequestEvent<'_>) -> HttpAttributes {
    HttpAttributesExtractor::default().extract_request_attributes(event)
}

/// Ordered HTTP attributes of a raw Lambda payload, using the default header names.
pub fn extract_request_attributes_from_json(payload: &JsonValue) -> HttpAttributes {
    HttpAttributesExtractor::default().extract_request_attributes_from_json(payload)
}

/// Write the status code of a gateway response onto `span`.
///
/// Nothing is written when either side is missing or the response is
/// [`HttpResponseEvent::Other`].
///
/// ```
/// use aws_lambda_events::apigw::ApiGatewayProxyResponse;
/// use lambda_otel_http_attributes::apply_response_attributes;
/// use tracing::Span;
///
/// let response = ApiGatewayProxyResponse {
///     status_code: 200,
///     ..Default::default()
/// };
/// apply_response_attributes(Some(&Span::current()), Some((&response).into()));
/// apply_response_attributes::<Span>(None, Some((&response).into()));
/// ```
pub fn apply_response_attributes<S: AttributeSink + ?Sized>(
    span: Option<&S>,
    result: Option<HttpResponseEvent<'_>>,
) {
    let (Some(span), Some(result)) = (span, result) else {
        return;
    };

    let Some(status_code) = result.status_code() else {
        debug!("skipping HTTP attributes for unrecognized response");
        return;
    };

    for key in STATUS_CODE_ATTRIBUTES {
        span.set_attribute(key, Value::I64(status_code));
    }
}
