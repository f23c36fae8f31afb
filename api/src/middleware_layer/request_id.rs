use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{Instrument, info, info_span};

pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn incoming_id(req: &Request<Body>) -> Option<String> {
    let v = req.headers().get(&X_REQUEST_ID)?.to_str().ok()?.trim();
    (!v.is_empty()).then(|| v.to_string())
}

fn new_request_id() -> String {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    format!("req-{nanos}")
}

/// Echoes or assigns `X-Request-Id` and runs the request inside a span
/// carrying it.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = incoming_id(&req).unwrap_or_else(new_request_id);
    let header = HeaderValue::from_str(&id).ok();
    if let Some(v) = &header {
        req.headers_mut().insert(X_REQUEST_ID, v.clone());
    }

    let span = info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path(),
    );
    let t0 = Instant::now();
    let mut res = next.run(req).instrument(span.clone()).await;

    if let Some(v) = header {
        res.headers_mut().insert(X_REQUEST_ID, v);
    }
    span.in_scope(|| {
        info!(
            status = res.status().as_u16(),
            latency_ms = t0.elapsed().as_millis() as u64,
            "request finished"
        )
    });
    res
}
