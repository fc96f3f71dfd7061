//! Request logging.

use axum::extract::Request;
use std::time::Duration;
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing::Span;

type MakeSpan = fn(&Request) -> Span;
type OnResponse = fn(&axum::response::Response, Duration, &Span);
type OnFailure = fn(ServerErrorsFailureClass, Duration, &Span);

/// One `http` span per request carrying method, path and query, with a
/// completion event that records status and latency in milliseconds.
///
/// ```text
/// INFO http{method=GET path=/weather/forecast query=city=Paris&date=18.10.2026}: finished status=200 latency_ms=184.2
/// ```
pub fn layer()
-> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeSpan, (), OnResponse, (), (), OnFailure>
{
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeSpan)
        .on_request(())
        .on_response(on_response as OnResponse)
        .on_body_chunk(())
        .on_eos(())
        .on_failure(on_failure as OnFailure)
}

fn make_span(request: &Request) -> Span {
    tracing::info_span!(
        "http",
        method = %request.method(),
        path = request.uri().path(),
        query = request.uri().query().unwrap_or(""),
    )
}

fn on_response(response: &axum::response::Response, latency: Duration, _span: &Span) {
    tracing::info!(
        status = response.status().as_u16(),
        latency_ms = latency.as_secs_f64() * 1000.0,
        "finished"
    );
}

fn on_failure(failure: ServerErrorsFailureClass, latency: Duration, _span: &Span) {
    tracing::error!(
        latency_ms = latency.as_secs_f64() * 1000.0,
        "request failed: {failure}"
    );
}
