//! The gateway event shapes the extractor understands.
//!
//! Lambda functions behind HTTP front doors receive one of three payloads:
//! - API Gateway REST API (v1): [`ApiGatewayProxyRequest`] / [`ApiGatewayProxyResponse`]
//! - API Gateway HTTP API (v2): [`ApiGatewayV2httpRequest`] / [`ApiGatewayV2httpResponse`]
//! - Application Load Balancer: [`AlbTargetGroupRequest`] / [`AlbTargetGroupResponse`]
//!
//! [`HttpRequestEvent`] and [`HttpResponseEvent`] borrow one of them for the
//! duration of a single extraction. The `Other` variants stand for any other
//! payload and produce no attributes.

use aws_lambda_events::alb::{AlbTargetGroupRequest, AlbTargetGroupResponse};
use aws_lambda_events::apigw::{
    ApiGatewayProxyRequest, ApiGatewayProxyResponse, ApiGatewayV2httpRequest,
    ApiGatewayV2httpResponse,
};
use serde_json::Value;
use thiserror::Error;

/// A borrowed gateway request.
#[derive(Debug, Clone, Copy)]
pub enum HttpRequestEvent<'a> {
    /// API Gateway REST API (v1) proxy request
    RestApi(&'a ApiGatewayProxyRequest),
    /// API Gateway HTTP API (v2) request
    HttpApi(&'a ApiGatewayV2httpRequest),
    /// Application Load Balancer target group request
    LoadBalancer(&'a AlbTargetGroupRequest),
    /// Any other payload
    Other,
}

impl<'a> From<&'a ApiGatewayProxyRequest> for HttpRequestEvent<'a> {
    fn from(request: &'a ApiGatewayProxyRequest) -> Self {
        Self::RestApi(request)
    }
}

impl<'a> From<&'a ApiGatewayV2httpRequest> for HttpRequestEvent<'a> {
    fn from(request: &'a ApiGatewayV2httpRequest) -> Self {
        Self::HttpApi(request)
    }
}

impl<'a> From<&'a AlbTargetGroupRequest> for HttpRequestEvent<'a> {
    fn from(request: &'a AlbTargetGroupRequest) -> Self {
        Self::LoadBalancer(request)
    }
}

/// A borrowed gateway response.
#[derive(Debug, Clone, Copy)]
pub enum HttpResponseEvent<'a> {
    /// API Gateway REST API (v1) proxy response
    RestApi(&'a ApiGatewayProxyResponse),
    /// API Gateway HTTP API (v2) response
    HttpApi(&'a ApiGatewayV2httpResponse),
    /// Application Load Balancer target group response
    LoadBalancer(&'a AlbTargetGroupResponse),
    /// Any other payload
    Other,
}

impl HttpResponseEvent<'_> {
    /// Status code of the response, `None` for [`HttpResponseEvent::Other`].
    pub fn status_code(&self) -> Option<i64> {
        match self {
            Self::RestApi(response) => Some(response.status_code),
            Self::HttpApi(response) => Some(response.status_code),
            Self::LoadBalancer(response) => Some(response.status_code),
            Self::Other => None,
        }
    }
}

impl<'a> From<&'a ApiGatewayProxyResponse> for HttpResponseEvent<'a> {
    fn from(response: &'a ApiGatewayProxyResponse) -> Self {
        Self::RestApi(response)
    }
}

impl<'a> From<&'a ApiGatewayV2httpResponse> for HttpResponseEvent<'a> {
    fn from(response: &'a ApiGatewayV2httpResponse) -> Self {
        Self::HttpApi(response)
    }
}

impl<'a> From<&'a AlbTargetGroupResponse> for HttpResponseEvent<'a> {
    fn from(response: &'a AlbTargetGroupResponse) -> Self {
        Self::LoadBalancer(response)
    }
}

/// Errors returned when reading a gateway request from raw JSON.
#[derive(Error, Debug)]
pub enum EventError {
    #[error("payload does not match a known gateway request shape")]
    UnknownShape,

    #[error("failed to deserialize gateway request: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// An owned gateway request, for handlers that receive untyped JSON.
#[derive(Debug, Clone)]
pub enum GatewayRequest {
    RestApi(Box<ApiGatewayProxyRequest>),
    HttpApi(Box<ApiGatewayV2httpRequest>),
    LoadBalancer(Box<AlbTargetGroupRequest>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    RestApi,
    HttpApi,
    LoadBalancer,
}

fn detect_shape(payload: &Value) -> Option<Shape> {
    let context = payload.get("requestContext")?;

    if context.get("elb").is_some() {
        Some(Shape::LoadBalancer)
    } else if payload.get("version").and_then(Value::as_str) == Some("2.0")
        && context.get("http").is_some()
    {
        Some(Shape::HttpApi)
    } else if payload.get("httpMethod").is_some() {
        Some(Shape::RestApi)
    } else {
        None
    }
}

impl GatewayRequest {
    /// Detect the request shape of a raw Lambda payload and deserialize it.
    ///
    /// - `requestContext.elb` present: Application Load Balancer
    /// - `version` is `"2.0"` and `requestContext.http` present: HTTP API v2
    /// - `httpMethod` and `requestContext` present: REST API v1
    pub fn from_json(payload: Value) -> Result<Self, EventError> {
        let request = match detect_shape(&payload).ok_or(EventError::UnknownShape)? {
            Shape::RestApi => Self::RestApi(Box::new(serde_json::from_value(payload)?)),
            Shape::HttpApi => Self::HttpApi(Box::new(serde_json::from_value(payload)?)),
            Shape::LoadBalancer => Self::LoadBalancer(Box::new(serde_json::from_value(payload)?)),
        };
        Ok(request)
    }

    /// Borrow this request for extraction.
    pub fn as_event(&self) -> HttpRequestEvent<'_> {
        match self {
            Self::RestApi(request) => HttpRequestEvent::RestApi(request),
            Self::HttpApi(request) => HttpRequestEvent::HttpApi(request),
            Self::LoadBalancer(request) => HttpRequestEvent::LoadBalancer(request),
        }
    }
}
