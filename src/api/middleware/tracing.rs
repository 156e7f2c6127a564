//! HTTP request/response tracing middleware.

use axum::{body::Body, http::Request};
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse,
    TraceLayer,
};
use tracing::{Level, Span};

type MakeSpanFn = fn(&Request<Body>) -> Span;

/// Concrete type of the layer returned by [`layer`].
pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    MakeSpanFn,
    DefaultOnRequest,
    DefaultOnResponse,
    DefaultOnBodyChunk,
    DefaultOnEos,
    DefaultOnFailure,
>;

/// Creates a tracing middleware for HTTP requests.
///
/// **On Request:** opens an `INFO` span carrying method, path and the
/// `Referer` header.
///
/// **On Response:** logs status and latency in milliseconds at `INFO`.
///
/// **On Failure:** 5xx responses are logged again at `ERROR`.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET path=/abcde referrer=https://google.com}: finished processing request latency=3 ms status=301
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpanFn)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
        .on_failure(
            DefaultOnFailure::new()
                .level(Level::ERROR)
                .latency_unit(LatencyUnit::Millis),
        )
}

fn make_span(request: &Request<Body>) -> Span {
    let referrer = request
        .headers()
        .get(axum::http::header::REFERER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        referrer,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_span_accepts_request_without_headers() {
        let request = Request::builder()
            .uri("/v1/links?page=2")
            .body(Body::empty())
            .unwrap();

        // No subscriber is installed, so the span is disabled but must still build.
        let _span = make_span(&request);
    }
}
