use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Backend used for inference.
///
/// `Gemini` is the hosted generation API; `Ollama` is a local runtime that
/// serves both generation and embeddings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini `generateContent` API.
    Gemini,
    /// Local Ollama runtime.
    Ollama,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    /// Parses `LLM_KIND` values (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "ollama" => Ok(LlmProvider::Ollama),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("Gemini".parse::<LlmProvider>().ok(), Some(LlmProvider::Gemini));
        assert_eq!(" ollama ".parse::<LlmProvider>().ok(), Some(LlmProvider::Ollama));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "chatgpt".parse::<LlmProvider>().unwrap_err();
        assert!(err.to_string().contains("chatgpt"));
    }
}
