//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) and echo it on the response
//! - Expose the inbound method and target to the route table
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied `x-request-id` is kept as is

use axum::http::{request::Parts, HeaderName, HeaderValue, Request};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

use crate::routing::RequestSource;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Layer that assigns a request ID to requests that lack one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid)
}

/// Layer that copies the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(X_REQUEST_ID)
}

/// Read the request ID header, if present.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

fn target(uri: &axum::http::Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}

impl<B> RequestSource for Request<B> {
    fn method(&self) -> &str {
        Request::method(self).as_str()
    }

    fn uri(&self) -> &str {
        target(Request::uri(self))
    }
}

impl RequestSource for Parts {
    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn uri(&self) -> &str {
        target(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_request_source_for_http_request() {
        let request = Request::builder()
            .method("PATCH")
            .uri("http://example.com/widgets/9?expand=1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(RequestSource::method(&request), "PATCH");
        assert_eq!(RequestSource::uri(&request), "/widgets/9?expand=1");

        let (parts, _) = request.into_parts();
        assert_eq!(RequestSource::uri(&parts), "/widgets/9?expand=1");
    }

    #[test]
    fn test_make_request_id() {
        let request = Request::builder().body(Body::empty()).unwrap();
        let id = MakeRequestUuid.make_request_id(&request).unwrap();
        let text = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(text).is_ok());
    }
}
