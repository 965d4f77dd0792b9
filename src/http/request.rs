//! Request identification.
//!
//! Every request is tagged with an `x-request-id` (UUID v4) before any other
//! middleware runs, and the same id is echoed on the response.

use axum::http::{HeaderName, Request};
use tower_http::request_id::RequestId;

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Access to the id assigned by the request-id layer.
pub trait RequestIdExt {
    fn request_id(&self) -> &str;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> &str {
        self.extensions()
            .get::<RequestId>()
            .and_then(|id| id.header_value().to_str().ok())
            .unwrap_or("unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_id_from_extension() {
        let mut req = Request::builder().uri("/").body(Body::empty()).unwrap();
        req.extensions_mut()
            .insert(RequestId::new(HeaderValue::from_static("abc-123")));
        assert_eq!(req.request_id(), "abc-123");
    }

    #[test]
    fn test_request_id_missing() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(req.request_id(), "unknown");
    }
}
