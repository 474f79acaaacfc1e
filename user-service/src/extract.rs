//! Request extractors
//!
//! Wrap axum's body and `Path` extractors so that malformed input is
//! reported as a 422 validation error with the service's error body,
//! instead of axum's plain-text rejections.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts, HeaderMap},
};
use serde_json::Value;

use crate::error::{Error, ValidationDetail};

/// Name of the id path parameter, as reported in validation errors
pub const USER_ID_PARAM: &str = "user_id";

/// A request body that parsed as JSON, not yet checked for shape
///
/// Bodies without a `Content-Type` header are parsed as JSON too. Any
/// content type other than `application/json` or `application/*+json` is
/// treated as a missing body.
#[derive(Debug)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !accepts_json(req.headers()) {
            return Err(missing_body());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| Error::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        if bytes.is_empty() {
            return Err(missing_body());
        }

        serde_json::from_slice(&bytes).map(Self).map_err(|_| {
            Error::Validation(vec![ValidationDetail::new(
                ["body"],
                "json_invalid",
                "JSON decode error",
            )])
        })
    }
}

fn missing_body() -> Error {
    Error::Validation(vec![ValidationDetail::new(
        ["body"],
        "missing",
        "Field required",
    )])
}

/// True when the content type is absent or names a JSON media type
fn accepts_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE) else {
        return true;
    };
    let Ok(content_type) = content_type.to_str() else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some(("application", "json")) => true,
        Some(("application", subtype)) => subtype.ends_with("+json"),
        _ => false,
    }
}

/// The integer `{id}` segment of a `/users/{id}` path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserIdPath(pub i64);

impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(PathRejection::FailedToDeserializePathParams(_)) => {
                Err(Error::Validation(vec![ValidationDetail::new(
                    ["path", USER_ID_PARAM],
                    "int_parsing",
                    "Input should be a valid integer, unable to parse string as an integer",
                )]))
            }
            Err(other) => Err(Error::Internal(other.body_text())),
        }
    }
}
