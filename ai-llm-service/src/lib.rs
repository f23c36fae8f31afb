//! Shared LLM access for the backend.
//!
//! One [`service_profiles::LlmServiceProfiles`] is built at startup with a
//! **generation** profile (Gemini or Ollama) and an **embedding** profile
//! (Ollama), wrapped in `Arc` and shared by every request.

pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider};
pub use error_handler::{AiLlmError, ConfigError, ProviderError, ProviderErrorKind};
pub use service_profiles::LlmServiceProfiles;
