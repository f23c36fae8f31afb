//! Question bank location and load-time embedding settings.

use std::{env, path::PathBuf};

use crate::errors::StoreError;

pub const DEFAULT_QUESTION_BANK_PATH: &str = "asset_/questions.jsonl";
pub const DEFAULT_EMBEDDING_CONCURRENCY: usize = 4;

/// Configuration for loading the corpus.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// JSONL file with one question per line.
    pub path: PathBuf,
    /// Required vector size. `None` takes the size of the first vector.
    pub expected_dim: Option<usize>,
    /// Maximum concurrent encoder calls while filling missing vectors.
    pub concurrency: usize,
    /// Ignore stored vectors and embed every row again.
    pub reembed: bool,
}

impl StoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            expected_dim: None,
            concurrency: DEFAULT_EMBEDDING_CONCURRENCY,
            reembed: false,
        }
    }

    /// Reads `QUESTION_BANK_PATH`, `EMBEDDING_DIM`, `EMBEDDING_CONCURRENCY`
    /// and `QUESTION_BANK_REEMBED`.
    pub fn from_env() -> Result<Self, StoreError> {
        let path = env_str("QUESTION_BANK_PATH")
            .unwrap_or_else(|| DEFAULT_QUESTION_BANK_PATH.to_string());

        let cfg = Self {
            path: PathBuf::from(path),
            expected_dim: env_usize("EMBEDDING_DIM")?,
            concurrency: env_usize("EMBEDDING_CONCURRENCY")?
                .unwrap_or(DEFAULT_EMBEDDING_CONCURRENCY),
            reembed: env_bool("QUESTION_BANK_REEMBED")?,
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::Config("question bank path is empty".into()));
        }
        if self.expected_dim == Some(0) {
            return Err(StoreError::Config("EMBEDDING_DIM must be > 0".into()));
        }
        if self.concurrency == 0 {
            return Err(StoreError::Config("EMBEDDING_CONCURRENCY must be > 0".into()));
        }
        Ok(())
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_usize(key: &str) -> Result<Option<usize>, StoreError> {
    env_str(key)
        .map(|v| {
            v.parse::<usize>()
                .map_err(|e| StoreError::Config(format!("{key}: {e}")))
        })
        .transpose()
}

fn env_bool(key: &str) -> Result<bool, StoreError> {
    match env_str(key).map(|v| v.to_ascii_lowercase()).as_deref() {
        None | Some("0" | "false" | "no") => Ok(false),
        Some("1" | "true" | "yes") => Ok(true),
        Some(other) => Err(StoreError::Config(format!("{key}: expected a boolean, got {other:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_are_rejected() {
        let mut cfg = StoreConfig::new("bank.jsonl");
        assert!(cfg.validate().is_ok());

        cfg.expected_dim = Some(0);
        assert!(matches!(cfg.validate(), Err(StoreError::Config(_))));

        cfg.expected_dim = Some(384);
        cfg.concurrency = 0;
        assert!(matches!(cfg.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(StoreConfig::new("").validate().is_err());
    }
}
