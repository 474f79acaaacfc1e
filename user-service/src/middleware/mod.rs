//! HTTP middleware
//!
//! Request ID generation and propagation plus sensitive header masking.
//! The remaining layers (CORS, compression, timeouts, body limits, tracing,
//! panic recovery) come straight from tower-http and are assembled in
//! [`crate::server`].

mod request_tracking;

pub use request_tracking::{
    request_id_layer, request_id_propagation_layer, sensitive_headers_layer, MakeTypedRequestId,
    REQUEST_ID_PREFIX, SENSITIVE_HEADERS,
};
