//! Per-request response decision.
//!
//! Rules, first match wins:
//! 1. forced status from `_return`
//! 2. GET → fixture lookup (200 / 404 / 500)
//! 3. PUT, DELETE → 200 with an empty body
//! 4. anything else → 200 with a plain-text acknowledgement

use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use crate::fixtures::{filename_for_url, FixtureError, FixtureStore};
use crate::mock::control::ControlParams;

pub const FALLBACK_MESSAGE: &str = "Request received. Check the server logs.";

/// Which rule produced a response. Used as a metrics label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Forced,
    Fixture,
    NotFound,
    Error,
    Default,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Forced => "forced",
            Outcome::Fixture => "fixture",
            Outcome::NotFound => "not_found",
            Outcome::Error => "error",
            Outcome::Default => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MockBody {
    Json(Value),
    Text(&'static str),
    Empty,
}

/// A fully computed response, not yet sent.
#[derive(Debug, Clone, PartialEq)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: MockBody,
    pub outcome: Outcome,
}

impl MockResponse {
    fn json(status: StatusCode, body: Value, outcome: Outcome) -> Self {
        Self {
            status,
            body: MockBody::Json(body),
            outcome,
        }
    }

    fn error(status: StatusCode, message: &str, outcome: Outcome) -> Self {
        Self::json(status, json!({ "error": message }), outcome)
    }
}

/// Compute the response for one request. Never fails.
pub async fn compose(
    store: &FixtureStore,
    method: &Method,
    raw_url: &str,
    control: &ControlParams,
) -> MockResponse {
    if let Some(code) = control.forced_status {
        return forced(code, raw_url);
    }

    match method {
        &Method::GET => from_fixture(store, raw_url).await,
        &Method::PUT | &Method::DELETE => MockResponse {
            status: StatusCode::OK,
            body: MockBody::Empty,
            outcome: Outcome::Default,
        },
        _ => MockResponse {
            status: StatusCode::OK,
            body: MockBody::Text(FALLBACK_MESSAGE),
            outcome: Outcome::Default,
        },
    }
}

fn forced(code: u64, raw_url: &str) -> MockResponse {
    let status = u16::try_from(code)
        .ok()
        .and_then(|c| StatusCode::from_u16(c).ok());

    match status {
        Some(status) => {
            tracing::info!(status = code, url = raw_url, "Forcing response status");
            MockResponse::json(
                status,
                json!({
                    "message": format!("Forced response with status code {code}"),
                    "originalUrl": raw_url,
                }),
                Outcome::Forced,
            )
        }
        None => {
            tracing::warn!(status = code, url = raw_url, "Forced status is not a valid HTTP status");
            MockResponse::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid status code",
                Outcome::Error,
            )
        }
    }
}

async fn from_fixture(store: &FixtureStore, raw_url: &str) -> MockResponse {
    let filename = filename_for_url(raw_url);
    tracing::info!(filename = %filename, "Looking up fixture");

    match store.lookup(&filename).await {
        Ok(document) => {
            tracing::info!(filename = %filename, "Serving fixture");
            MockResponse::json(StatusCode::OK, document, Outcome::Fixture)
        }
        Err(e @ FixtureError::NotFound { .. }) => {
            tracing::info!(error = %e, "No fixture for request");
            MockResponse::error(StatusCode::NOT_FOUND, "Not found", Outcome::NotFound)
        }
        Err(e @ FixtureError::Read { .. }) => {
            tracing::error!(error = %e, "Failed to read fixture");
            MockResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "Server error", Outcome::Error)
        }
        Err(e @ FixtureError::Parse { .. }) => {
            tracing::error!(error = %e, "Fixture contains invalid JSON");
            MockResponse::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Invalid mock data",
                Outcome::Error,
            )
        }
    }
}
