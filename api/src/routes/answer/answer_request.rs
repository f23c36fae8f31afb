use serde::{Deserialize, Serialize};

/// Request payload for /answer.
#[derive(Debug, Default, Deserialize)]
pub struct AnswerRequest {
    /// Natural language query; absent means empty.
    #[serde(default)]
    pub query: String,
}

/// Response payload for /answer.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    /// Model output or a fixed status message.
    pub answer: String,
}
