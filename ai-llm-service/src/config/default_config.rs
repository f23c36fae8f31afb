//! Model profiles loaded from environment variables.
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_KIND`         = generation provider (`gemini` | `ollama`, default `gemini`)
//! - `LLM_MAX_TOKENS`   = optional max tokens (u32)
//! - `LLM_TIMEOUT_SECS` = HTTP timeout for generation (default 60)
//! - `LLM_TEMPERATURE`  = optional sampling temperature; unset keeps the
//!   model's own default
//!
//! Gemini:
//! - `GEMINI_API_KEY` (legacy alias `GEMNIE_API_KEY`) = API key, optional at startup
//! - `GEMINI_MODEL` = model (default `gemini-2.0-flash`)
//! - `GEMINI_URL`   = endpoint (default `https://generativelanguage.googleapis.com`)
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL`    = generation model (default `qwen3:14b`)
//! - `EMBEDDING_MODEL` = embedding model (default `all-minilm`)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, validate_http_endpoint,
    },
};

pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "qwen3:14b";
pub const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm";

/// Resolves the Ollama endpoint.
///
/// Precedence:
/// 1. `OLLAMA_URL` if present and non-empty
/// 2. `OLLAMA_PORT` → `http://localhost:{port}`
/// 3. [`DEFAULT_OLLAMA_URL`]
fn ollama_endpoint() -> Result<String, AiLlmError> {
    if let Some(url) = env_opt("OLLAMA_URL") {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url);
    }
    if let Some(port) = env_opt("OLLAMA_PORT") {
        port.trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{}", port.trim()));
    }
    Ok(DEFAULT_OLLAMA_URL.to_string())
}

fn generation_timeout() -> Result<Option<u64>, AiLlmError> {
    Ok(Some(env_opt_u64("LLM_TIMEOUT_SECS")?.unwrap_or(60)))
}

/// Gemini generation profile.
///
/// The API key is read here but not required: a missing key surfaces as a
/// provider error on the first generation call.
pub fn config_gemini_generation() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = env_opt("GEMINI_URL").unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string());
    validate_http_endpoint("GEMINI_URL", &endpoint)?;

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model: env_opt("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        endpoint,
        api_key: env_opt("GEMINI_API_KEY").or_else(|| env_opt("GEMNIE_API_KEY")),
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: env_opt_f32("LLM_TEMPERATURE")?,
        top_p: None,
        timeout_secs: generation_timeout()?,
    })
}

/// Ollama generation profile.
pub fn config_ollama_generation() -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: env_opt("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
        endpoint: ollama_endpoint()?,
        api_key: None,
        max_tokens: env_opt_u32("LLM_MAX_TOKENS")?,
        temperature: Some(0.2),
        top_p: Some(0.9),
        timeout_secs: generation_timeout()?,
    })
}

/// Generation profile selected by `LLM_KIND` (default Gemini).
pub fn config_generation() -> Result<LlmModelConfig, AiLlmError> {
    let kind = match env_opt("LLM_KIND") {
        Some(v) => v.parse::<LlmProvider>()?,
        None => LlmProvider::Gemini,
    };
    match kind {
        LlmProvider::Gemini => config_gemini_generation(),
        LlmProvider::Ollama => config_ollama_generation(),
    }
}

/// Ollama embedding profile (deterministic, short timeout).
pub fn config_ollama_embedding() -> Result<LlmModelConfig, AiLlmError> {
    Ok(LlmModelConfig {
        provider: LlmProvider::Ollama,
        model: env_opt("EMBEDDING_MODEL").unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        endpoint: ollama_endpoint()?,
        api_key: None,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(30),
    })
}
