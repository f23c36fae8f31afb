//! GET /: liveness probe.

use axum::Json;
use serde::Serialize;

pub const RUNNING_MESSAGE: &str = "EUEE AI backend is running!";

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: RUNNING_MESSAGE,
    })
}
