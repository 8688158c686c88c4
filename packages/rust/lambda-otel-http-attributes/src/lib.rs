//! OpenTelemetry HTTP attributes for AWS Lambda functions behind HTTP front doors.
//!
//! Lambda functions invoked through API Gateway or an Application Load Balancer
//! receive one of three differently shaped events. This crate reads the same set
//! of HTTP facts from each of them (scheme, target, path, query, method, host
//! and port) and writes the response status code back onto a span.
//!
//! # Supported events
//!
//! - API Gateway REST API (v1): `ApiGatewayProxyRequest` / `ApiGatewayProxyResponse`
//! - API Gateway HTTP API (v2): `ApiGatewayV2httpRequest` / `ApiGatewayV2httpResponse`
//! - Application Load Balancer: `AlbTargetGroupRequest` / `AlbTargetGroupResponse`
//!
//! Any other payload is accepted and produces no attributes.
//!
//! # Architecture
//!
//! - [`events`]: borrowed and owned views over the supported event types
//! - [`extractor`]: request attribute extraction and response status attributes
//! - [`query`]: query string reconstruction
//! - [`host`]: host and port resolution from the host header
//! - [`attributes`]: the ordered attribute list and the span sink
//!
//! Span creation, exporters and the Lambda runtime wiring are left to the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
//! use lambda_otel_http_attributes::{
//!     apply_response_attributes, extract_request_attributes, HttpRequestEvent,
//! };
//! use lambda_runtime::{Error, LambdaEvent};
//! use tracing::Span;
//!
//! async fn handler(
//!     event: LambdaEvent<ApiGatewayProxyRequest>,
//! ) -> Result<ApiGatewayProxyResponse, Error> {
//!     let span = Span::current();
//!     extract_request_attributes(HttpRequestEvent::from(&event.payload)).record_on(&span);
//!
//!     let response = ApiGatewayProxyResponse {
//!         status_code: 200,
//!         ..Default::default()
//!     };
//!     apply_response_attributes(Some(&span), Some((&response).into()));
//!     Ok(response)
//! }
//! ```
//!
//! # Configuration
//!
//! The headers read for the scheme and the host can be changed through
//! environment variables when using [`HttpAttributesExtractor::from_env`]:
//!
//! - `LAMBDA_HTTP_ATTRIBUTES_FORWARDED_PROTO_HEADER`: scheme header
//!   - Defaults to `x-forwarded-proto`
//! - `LAMBDA_HTTP_ATTRIBUTES_HOST_HEADER`: host header
//!   - Defaults to `host`
//!
//! See [`ExtractorConfig`] for programmatic configuration.

pub mod attributes;
pub mod constants;
pub mod events;
pub mod extractor;
pub mod host;
pub mod query;

mod config;
mod headers;

#[cfg(test)]
mod fixtures;

pub use attributes::{AttributeSink, HttpAttributes};
pub use config::{ExtractorConfig, ExtractorConfigBuilder};
pub use events::{EventError, GatewayRequest, HttpRequestEvent, HttpResponseEvent};
pub use extractor::{
    apply_response_attributes, extract_request_attributes, extract_request_attributes_from_json,
    HttpAttributesExtractor,
};
pub use host::{resolve_host_port, HostPort};

#[cfg(doctest)]
#[macro_use]
extern crate doc_comment;

#[cfg(doctest)]
use doc_comment::doctest;

#[cfg(doctest)]
doctest!("../README.md", readme);
