//! Conversion of computed responses into HTTP responses.
//!
//! JSON bodies are serialized compactly, so a fixture `{"a":1}` is sent as
//! exactly `{"a":1}`. Error payloads always have the shape `{"error": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::middleware::body::BodyError;
use crate::mock::{MockBody, MockResponse};

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        match self.body {
            MockBody::Json(value) => (self.status, Json(value)).into_response(),
            MockBody::Text(text) => (self.status, text).into_response(),
            MockBody::Empty => self.status.into_response(),
        }
    }
}

impl IntoResponse for BodyError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            BodyError::TooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large"),
            BodyError::Unreadable(_) => (StatusCode::BAD_REQUEST, "Failed to read request body"),
            BodyError::MalformedJson(_) | BodyError::NotAnObjectOrArray | BodyError::MalformedForm => {
                (StatusCode::BAD_REQUEST, "Malformed request body")
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
