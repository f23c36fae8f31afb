//! POST /answer: answers a query from the exam question bank.

use std::{sync::Arc, time::Instant};

use axum::{Json, extract::State};
use tracing::info;

use crate::{
    core::app_state::AppState,
    routes::answer::answer_request::{AnswerRequest, AnswerResponse},
};

/// Handler: POST /answer
///
/// Always 200; failures are reported in `answer`.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:10000/answer \
///   -H 'content-type: application/json' \
///   -d '{"query":"give me 3 history questions"}'
/// ```
pub async fn answer(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnswerRequest>,
) -> Json<AnswerResponse> {
    let t0 = Instant::now();
    let outcome = state.engine.answer(&body.query).await;

    info!(
        outcome = outcome.kind(),
        latency_ms = t0.elapsed().as_millis() as u64,
        "answer served"
    );

    Json(AnswerResponse {
        answer: outcome.message(),
    })
}
