//! Request spans for the page and health routes.

use axum::body::Body;
use axum::http::Request;
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{Level, Span, field};

/// Span field filled in once the session cookie resolves to a customer.
pub const CUSTOMER_KEY_FIELD: &str = "customer_key";

type MakeRequestSpan = fn(&Request<Body>) -> Span;

/// Opens an `INFO` span per request with method and path.
///
/// The query string is left out. `customer_key` starts empty and is recorded
/// by the session middleware, so anonymous requests log without it:
///
/// ```text
/// INFO request{method=POST path=/transaction/create customer_key=1}: finished processing request latency=4 ms status=303
/// INFO request{method=GET path=/login}: finished processing request latency=0 ms status=200
/// ```
fn make_span(req: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        customer_key = field::Empty,
    )
}

/// Trace layer logging every response with status and latency in milliseconds.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, MakeRequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(make_span as MakeRequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}

/// Tags the current request span with the authenticated customer.
pub fn record_customer(customer_key: i64) {
    Span::current().record(CUSTOMER_KEY_FIELD, customer_key);
}
