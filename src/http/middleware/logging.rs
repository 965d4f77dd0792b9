//! Request and body logging.
//!
//! The request line is emitted from `TraceLayer::on_request`, inside a span
//! carrying the request id, so every later log line of the request is tagged.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, Request},
    http,
    middleware::Next,
    response::Response,
};
use serde_json::Value;
use tracing::Span;

use crate::http::middleware::body::ParsedBody;
use crate::http::request::RequestIdExt;

pub fn request_span(req: &http::Request<Body>) -> Span {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_default();

    tracing::info_span!(
        "request",
        request_id = %req.request_id(),
        peer = %peer,
    )
}

pub fn log_request(req: &http::Request<Body>, _span: &Span) {
    tracing::info!("Received {} request to {}", req.method(), req.uri());
}

pub async fn log_body(req: Request, next: Next) -> Response {
    if let Some(ParsedBody(body)) = req.extensions().get::<ParsedBody>() {
        if has_content(body) {
            tracing::info!(body = %body, "Request body");
        }
    }
    next.run(req).await
}

fn has_content(body: &Value) -> bool {
    match body {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Null => false,
        _ => true,
    }
}
