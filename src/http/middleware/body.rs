//! Request body parsing.
//!
//! # Responsibilities
//! - Buffer JSON and urlencoded bodies up to `limits.max_body_size`
//! - Attach the parsed value as a [`ParsedBody`] extension
//! - Reject malformed bodies with 400 and oversize bodies with 413
//!
//! # Design Decisions
//! - Strict JSON: only objects and arrays are accepted
//! - An empty body is not an error, it just yields no `ParsedBody`
//! - Other content types pass through untouched and unbuffered
//! - Urlencoded bodies decode to a flat object of strings: bracketed keys
//!   such as `a[b]=1` stay literal keys, they are not expanded into nesting

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use serde_json::{Map, Value};

use crate::config::LimitsConfig;
use crate::http::request::RequestIdExt;

/// The structured form of the request body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody(pub Value);

#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    #[error("request body exceeds the configured limit")]
    TooLarge,

    #[error("failed to read request body: {0}")]
    Unreadable(#[source] axum::Error),

    #[error("invalid JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("JSON body must be an object or an array")]
    NotAnObjectOrArray,

    #[error("urlencoded body is not valid UTF-8")]
    MalformedForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(headers: &HeaderMap) -> Self {
        let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
            return BodyKind::Other;
        };
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime == "application/json" || mime.ends_with("+json") {
            BodyKind::Json
        } else if mime == "application/x-www-form-urlencoded" {
            BodyKind::Form
        } else {
            BodyKind::Other
        }
    }
}

pub async fn parse_body(
    State(limits): State<LimitsConfig>,
    req: Request,
    next: Next,
) -> Response {
    let kind = BodyKind::of(req.headers());
    if kind == BodyKind::Other {
        return next.run(req).await;
    }

    let request_id = req.request_id().to_owned();
    let (mut parts, body) = req.into_parts();

    let parsed = read_body(body, limits.max_body_size)
        .await
        .and_then(|bytes| Ok((parse(kind, &bytes)?, bytes)));

    match parsed {
        Ok((value, bytes)) => {
            if let Some(value) = value {
                parts.extensions.insert(ParsedBody(value));
            }
            next.run(Request::from_parts(parts, Body::from(bytes))).await
        }
        Err(e) => {
            tracing::warn!(request_id = %request_id, error = %e, "Rejected request body");
            e.into_response()
        }
    }
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, BodyError> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        if exceeded_limit(&e) {
            BodyError::TooLarge
        } else {
            BodyError::Unreadable(e)
        }
    })
}

fn exceeded_limit(err: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}

fn parse(kind: BodyKind, bytes: &[u8]) -> Result<Option<Value>, BodyError> {
    if bytes.is_empty() {
        return Ok(None);
    }

    match kind {
        BodyKind::Json => {
            let value: Value = serde_json::from_slice(bytes)?;
            if value.is_object() || value.is_array() {
                Ok(Some(value))
            } else {
                Err(BodyError::NotAnObjectOrArray)
            }
        }
        BodyKind::Form => parse_form(bytes).map(Some),
        BodyKind::Other => Ok(None),
    }
}

/// Repeated keys collect into an array, in order of appearance. Keys are
/// taken as-is, without bracket expansion.
fn parse_form(bytes: &[u8]) -> Result<Value, BodyError> {
    if std::str::from_utf8(bytes).is_err() {
        return Err(BodyError::MalformedForm);
    }

    let mut fields = Map::new();
    for (key, value) in url::form_urlencoded::parse(bytes) {
        let value = Value::String(value.into_owned());
        match fields.get_mut(key.as_ref()) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                fields.insert(key.into_owned(), value);
            }
        }
    }
    Ok(Value::Object(fields))
}
