//! Gateway event payloads shared by the unit tests.
//!
//! Each builder starts from a payload shaped like the ones Lambda delivers and
//! replaces the top-level fields given in `overrides`.

use aws_lambda_events::alb::AlbTargetGroupRequest;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayV2httpRequest};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

fn merge(mut base: Value, overrides: Value) -> Value {
    if let (Some(target), Value::Object(fields)) = (base.as_object_mut(), overrides) {
        for (key, value) in fields {
            target.insert(key, value);
        }
    }
    base
}

fn build<T: DeserializeOwned>(payload: Value) -> T {
    serde_json::from_value(payload).expect("fixture payload should deserialize")
}

pub(crate) fn rest_api_payload(overrides: Value) -> Value {
    merge(
        json!({
            "resource": "/foo",
            "path": "/foo",
            "httpMethod": "GET",
            "headers": {
                "Host": "api.example.com",
                "X-Forwarded-Proto": "https"
            },
            "multiValueHeaders": {
                "Host": ["api.example.com"],
                "X-Forwarded-Proto": ["https"]
            },
            "pathParameters": null,
            "stageVariables": null,
            "requestContext": {
                "accountId": "123456789012",
                "resourceId": "abc123",
                "stage": "prod",
                "requestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
                "requestTimeEpoch": 1428582896000_i64,
                "identity": {
                    "sourceIp": "192.0.2.1",
                    "userAgent": "curl/8.4.0"
                },
                "authorizer": {
                    "principalId": "user"
                },
                "resourcePath": "/foo",
                "httpMethod": "GET",
                "apiId": "1234567890",
                "protocol": "HTTP/1.1"
            },
            "body": null,
            "isBase64Encoded": false
        }),
        overrides,
    )
}

pub(crate) fn http_api_payload(overrides: Value) -> Value {
    merge(
        json!({
            "version": "2.0",
            "routeKey": "$default",
            "rawPath": "/my/path",
            "rawQueryString": "",
            "headers": {
                "host": "api.example.com",
                "x-forwarded-proto": "https"
            },
            "requestContext": {
                "accountId": "123456789012",
                "apiId": "api-id",
                "domainName": "api.example.com",
                "domainPrefix": "api",
                "http": {
                    "method": "POST",
                    "path": "/my/path",
                    "protocol": "HTTP/1.1",
                    "sourceIp": "192.0.2.1",
                    "userAgent": "curl/8.4.0"
                },
                "requestId": "JKJaXmPLvHcESHA=",
                "routeKey": "$default",
                "stage": "$default",
                "time": "10/Mar/2020:05:16:23 +0000",
                "timeEpoch": 1583817383220_i64
            },
            "isBase64Encoded": false
        }),
        overrides,
    )
}

pub(crate) fn load_balancer_payload(overrides: Value) -> Value {
    merge(
        json!({
            "requestContext": {
                "elb": {
                    "targetGroupArn": "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/lambda-target/abcdefg"
                }
            },
            "httpMethod": "GET",
            "path": "/lambda",
            "headers": {
                "host": "lambda-alb-123578498.us-east-1.elb.amazonaws.com",
                "x-forwarded-proto": "http"
            },
            "body": "",
            "isBase64Encoded": false
        }),
        overrides,
    )
}

pub(crate) fn rest_api_request(overrides: Value) -> ApiGatewayProxyRequest {
    build(rest_api_payload(overrides))
}

pub(crate) fn http_api_request(overrides: Value) -> ApiGatewayV2httpRequest {
    build(http_api_payload(overrides))
}

pub(crate) fn load_balancer_request(overrides: Value) -> AlbTargetGroupRequest {
    build(load_balancer_payload(overrides))
}
