use crate::config::llm_provider::LlmProvider;

/// Configuration for one model profile (generation or embedding).
///
/// # Fields
///
/// - `provider`: which backend serves this profile.
/// - `model`: model identifier (e.g. `"gemini-2.0-flash"`, `"all-minilm"`).
/// - `endpoint`: base URL of the API.
/// - `api_key`: secret for hosted providers; `None` for local Ollama.
/// - `max_tokens`: optional generation cap.
/// - `temperature` / `top_p`: sampling knobs, forwarded when set.
/// - `timeout_secs`: HTTP client timeout.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Endpoint without trailing slashes, ready for path concatenation.
    pub fn base_url(&self) -> String {
        self.endpoint.trim().trim_end_matches('/').to_string()
    }
}
