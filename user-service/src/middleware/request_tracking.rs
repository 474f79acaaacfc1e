//! Request tracking middleware
//!
//! Generates an `x-request-id` for every request that lacks one, echoes it
//! on the response and keeps credentials out of trace output.

use http::{HeaderValue, Request};
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};
use uuid::Uuid;

/// Prefix of generated request ids
pub const REQUEST_ID_PREFIX: &str = "req";

/// Sensitive headers that should be masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Generates time-sortable request ids of the form `req_<uuidv7>`
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeTypedRequestId;

impl MakeTypedRequestId {
    /// Produce a fresh id string
    pub fn next_id() -> String {
        format!("{}_{}", REQUEST_ID_PREFIX, Uuid::now_v7().simple())
    }
}

impl MakeRequestId for MakeTypedRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let header_value = HeaderValue::from_str(&Self::next_id()).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Create a request ID layer that generates typed request IDs
pub fn request_id_layer() -> SetRequestIdLayer<MakeTypedRequestId> {
    SetRequestIdLayer::x_request_id(MakeTypedRequestId)
}

/// Create a request ID propagation layer
pub fn request_id_propagation_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Create a sensitive headers layer
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    let headers = SENSITIVE_HEADERS
        .iter()
        .map(|h| http::HeaderName::from_static(*h))
        .collect::<Vec<_>>();

    SetSensitiveRequestHeadersLayer::new(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_unique() {
        let a = MakeTypedRequestId::next_id();
        let b = MakeTypedRequestId::next_id();
        assert!(a.starts_with("req_"));
        assert_eq!(a.len(), "req_".len() + 32);
        assert_ne!(a, b);
    }

    #[test]
    fn test_make_request_id() {
        let request = Request::new(());
        let id = MakeTypedRequestId.make_request_id(&request).unwrap();
        assert!(id.header_value().to_str().unwrap().starts_with("req_"));
    }

    #[test]
    fn test_sensitive_headers_constant() {
        assert!(SENSITIVE_HEADERS.contains(&"authorization"));
        assert!(SENSITIVE_HEADERS.contains(&"x-api-key"));
    }
}
