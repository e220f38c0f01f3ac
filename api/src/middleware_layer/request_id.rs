use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{Instrument, info, info_span};

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Reuse a caller-supplied id when it is a non-blank, valid header value.
fn incoming_request_id(req: &Request<Body>) -> Option<String> {
    let value = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn generate_request_id() -> String {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    format!("req-{nanos}")
}

/// Tags every request with an id, runs it inside a span carrying that id,
/// and echoes the id back in the `X-Request-Id` response header.
pub async fn request_id(req: Request<Body>, next: Next) -> Response {
    let id = incoming_request_id(&req).unwrap_or_else(generate_request_id);
    let span = info_span!(
        "http_request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path()
    );

    let started = Instant::now();
    let mut res = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = res.status().as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "request finished"
        );
    });

    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    res
}
