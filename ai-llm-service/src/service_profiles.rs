//! Shared LLM service with two profiles: `generation` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Caches provider clients per config (provider+endpoint+model+key+timeout).
//! - Clients are built lazily, so a bad or missing credential surfaces on the
//!   first call that needs it rather than at startup.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svc = Arc::new(LlmServiceProfiles::from_env()?);
//! let v = svc.embed("Who was the first emperor of Ethiopia?").await?;
//! let txt = svc.generate("Say hello").await?;
//! println!("{} dims, {txt}", v.len());
//! # Ok(()) }
//! ```

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use tracing::info;

use crate::{
    config::{
        default_config::{config_generation, config_ollama_embedding},
        llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::{AiLlmError, ConfigError},
    services::{gemini_service::GeminiService, ollama_service::OllamaService},
};

/// Shared service managing the **generation** and **embedding** profiles.
pub struct LlmServiceProfiles {
    generation: LlmModelConfig,
    embedding: LlmModelConfig,

    ollama: RwLock<HashMap<ClientKey, Arc<OllamaService>>>,
    gemini: RwLock<HashMap<ClientKey, Arc<GeminiService>>>,
}

impl LlmServiceProfiles {
    /// Creates a service from explicit profiles.
    pub fn new(generation: LlmModelConfig, embedding: LlmModelConfig) -> Self {
        Self {
            generation,
            embedding,
            ollama: RwLock::new(HashMap::new()),
            gemini: RwLock::new(HashMap::new()),
        }
    }

    /// Builds both profiles from environment variables.
    ///
    /// # Errors
    /// Returns [`AiLlmError::Config`] for malformed values (bad numbers,
    /// unknown `LLM_KIND`, endpoints without scheme).
    pub fn from_env() -> Result<Self, AiLlmError> {
        let generation = config_generation()?;
        let embedding = config_ollama_embedding()?;

        info!(
            generation_provider = ?generation.provider,
            generation_model = %generation.model,
            embedding_model = %embedding.model,
            embedding_endpoint = %embedding.endpoint,
            "LLM profiles loaded"
        );

        Ok(Self::new(generation, embedding))
    }

    /// Generates text using the **generation** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if client construction or the call fails.
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let cfg = &self.generation;
        match cfg.provider {
            LlmProvider::Gemini => self.get_or_init_gemini(cfg).await?.generate(prompt).await,
            LlmProvider::Ollama => self.get_or_init_ollama(cfg).await?.generate(prompt).await,
        }
    }

    /// Computes one embedding using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails or the profile's provider
    /// has no embedding support.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let cfg = &self.embedding;
        match cfg.provider {
            LlmProvider::Ollama => self.get_or_init_ollama(cfg).await?.embeddings(input).await,
            LlmProvider::Gemini => Err(ConfigError::UnsupportedProvider(
                "gemini embeddings are not supported; use an Ollama embedding profile".into(),
            )
            .into()),
        }
    }

    /* --------------------- Internals --------------------- */

    async fn get_or_init_ollama(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<OllamaService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.ollama.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.ollama.write().await;
        if let Some(cli) = w.get(&key) {
            return Ok(cli.clone());
        }
        let cli = Arc::new(OllamaService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }

    async fn get_or_init_gemini(
        &self,
        cfg: &LlmModelConfig,
    ) -> Result<Arc<GeminiService>, AiLlmError> {
        let key = ClientKey::from(cfg);
        if let Some(cli) = self.gemini.read().await.get(&key).cloned() {
            return Ok(cli);
        }
        let mut w = self.gemini.write().await;
        if let Some(cli) = w.get(&key) {
            return Ok(cli.clone());
        }
        let cli = Arc::new(GeminiService::new(cfg.clone())?);
        w.insert(key, cli.clone());
        Ok(cli)
    }
}

/// Internal cache key identifying a unique client config.
#[derive(Clone, PartialEq, Eq, Hash)]
struct ClientKey {
    provider: LlmProvider,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<u64>,
}

impl From<&LlmModelConfig> for ClientKey {
    fn from(cfg: &LlmModelConfig) -> Self {
        Self {
            provider: cfg.provider,
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            api_key: cfg.api_key.clone(),
            timeout: cfg.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gemini(api_key: Option<&str>) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Gemini,
            model: "gemini-2.0-flash".into(),
            endpoint: "https://generativelanguage.googleapis.com".into(),
            api_key: api_key.map(str::to_string),
            max_tokens: None,
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    fn ollama_embedding() -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "all-minilm".into(),
            endpoint: "http://localhost:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: Some(0.0),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[tokio::test]
    async fn missing_gemini_key_surfaces_on_first_generate() {
        let svc = LlmServiceProfiles::new(gemini(None), ollama_embedding());
        let err = svc.generate("hello").await.unwrap_err();
        assert!(err.to_string().contains("missing API key"));
    }

    #[tokio::test]
    async fn gemini_embedding_profile_is_rejected() {
        let svc = LlmServiceProfiles::new(gemini(Some("k")), gemini(Some("k")));
        let err = svc.embed("x").await.unwrap_err();
        assert!(matches!(err, AiLlmError::Config(ConfigError::UnsupportedProvider(_))));
    }

    #[tokio::test]
    async fn clients_are_cached_per_config() {
        let svc = LlmServiceProfiles::new(gemini(Some("k")), ollama_embedding());
        let a = svc.get_or_init_ollama(&ollama_embedding()).await.unwrap();
        let b = svc.get_or_init_ollama(&ollama_embedding()).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
