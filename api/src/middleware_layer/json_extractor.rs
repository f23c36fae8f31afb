use axum::{
    Json,
    body::{Body, Bytes},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::routes::answer::answer_request::AnswerResponse;

async fn take_body(res: Response) -> Bytes {
    let (_, body) = res.into_parts();
    axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default()
}

fn is_extractor_rejection(status: StatusCode) -> bool {
    status == StatusCode::BAD_REQUEST
        || status == StatusCode::UNSUPPORTED_MEDIA_TYPE
        || status == StatusCode::UNPROCESSABLE_ENTITY
        || status == StatusCode::PAYLOAD_TOO_LARGE
}

fn hint(original: &str) -> Option<&'static str> {
    if original.contains("Content-Type") {
        Some("send the body with `Content-Type: application/json`")
    } else if original.contains("length limit exceeded") {
        Some("request body is larger than 2 MB")
    } else if original.contains("invalid type") {
        Some("expected {\"query\": \"...\"} with a string value")
    } else {
        None
    }
}

/// Rewrites JSON extractor rejections into `200 {"answer": "Invalid request: ..."}`.
///
/// Other responses pass through untouched.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if !is_extractor_rejection(status) {
        return res;
    }

    let bytes = take_body(res).await;
    let original = String::from_utf8_lossy(&bytes);
    let original = original.trim();
    debug!(status = status.as_u16(), rejection = %original, "request body rejected");

    let answer = match hint(original) {
        Some(h) => format!("Invalid request: {original} ({h})"),
        None => format!("Invalid request: {original}"),
    };

    (StatusCode::OK, Json(AnswerResponse { answer })).into_response()
}
