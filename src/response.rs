//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Handlers build a [`Response`] (or anything that converts into one) and
//! return it. The server turns it into a hyper response at the very end.

use bytes::Bytes;
use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderValue};
use http_body_util::Full;
use serde::Serialize;
use tracing::error;

const JSON: &str = "application/json";
const TEXT: &str = "text/plain; charset=utf-8";

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use http::StatusCode;
/// use reviews::Response;
///
/// Response::json(br#"{"reviewId":"r1"}"#.to_vec());
/// Response::text("helloworld");
/// Response::status(StatusCode::NO_CONTENT);
/// Response::text("review not found").with_status(StatusCode::NOT_FOUND);
/// ```
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Bytes,
}

impl Response {
    /// `200 OK`, `application/json`.
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self { status: StatusCode::OK, content_type: Some(JSON), body: body.into() }
    }

    /// `200 OK`, `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self { status: StatusCode::OK, content_type: Some(TEXT), body: Bytes::from(body.into()) }
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { status: code, content_type: None, body: Bytes::new() }
    }

    /// Replace the status, keeping body and content type.
    pub fn with_status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn content_type(&self) -> Option<&'static str> { self.content_type }
    pub fn body(&self) -> &[u8] { &self.body }

    pub(crate) fn into_inner(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(self.body));
        *res.status_mut() = self.status;
        if let Some(content_type) = self.content_type {
            res.headers_mut().insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        res
    }
}

// ── Json ─────────────────────────────────────────────────────────────────────

/// Serialises its contents as the `200 OK` JSON body.
///
/// A value that fails to serialise becomes a `500` with the serializer's
/// message as the plain-text body.
#[derive(Debug, Clone, PartialEq)]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        match serde_json::to_vec(&self.0) {
            Ok(bytes) => Response::json(bytes),
            Err(e) => {
                error!("response serialization failed: {e}");
                Response::text(e.to_string()).with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a bare status from a handler: `StatusCode::NO_CONTENT`.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

/// Success and failure both know how to render themselves; a handler
/// returning `Result` never formats its own error response.
impl<T: IntoResponse, E: IntoResponse> IntoResponse for Result<T, E> {
    fn into_response(self) -> Response {
        match self {
            Ok(ok) => ok.into_response(),
            Err(err) => err.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_wrapper_serialises_with_content_type() {
        let res = Json(vec![1, 2, 3]).into_response();
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.content_type(), Some(JSON));
        assert_eq!(res.body(), b"[1,2,3]".as_slice());
    }

    #[test]
    fn bare_status_has_no_body_or_content_type() {
        let res = StatusCode::NO_CONTENT.into_response();
        assert_eq!(res.status_code(), StatusCode::NO_CONTENT);
        assert!(res.body().is_empty());
        assert!(res.content_type().is_none());

        let inner = res.into_inner();
        assert!(inner.headers().get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn result_picks_the_matching_side() {
        let ok: Result<&'static str, StatusCode> = Ok("fine");
        assert_eq!(ok.into_response().status_code(), StatusCode::OK);

        let err: Result<&'static str, StatusCode> = Err(StatusCode::BAD_GATEWAY);
        assert_eq!(err.into_response().status_code(), StatusCode::BAD_GATEWAY);
    }
}
