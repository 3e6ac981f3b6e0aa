use axum::http::Request;
use tower_http::trace::MakeSpan;
use tracing::Span;

use super::REQUEST_ID_HEADER;

/// Span for one HTTP request.
///
/// Records the path without its query string: guest tokens travel as
/// `?guestToken=` and must not end up in logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            path = request.uri().path(),
            request_id,
        )
    }
}

