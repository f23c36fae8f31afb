//! Runtime configuration loaded from environment variables.

use std::time::Duration;

use question_store::StoreConfig;

use crate::{
    error::AnswerError,
    limit::{LimitRules, LowerBound},
};

pub const DEFAULT_LIMIT: usize = 10;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 60;

/// Config bag for the engine. All fields have defaults via `from_env`.
#[derive(Clone, Debug)]
pub struct AnswerConfig {
    /// Result count when the query names none.
    pub default_limit: usize,
    pub lower_bound: LowerBound,
    /// Upper bound on one generation call.
    pub generation_timeout: Duration,
    pub store: StoreConfig,
}

impl AnswerConfig {
    pub fn new(store: StoreConfig) -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            lower_bound: LowerBound::PassThrough,
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
            store,
        }
    }

    /// Reads `ANSWER_DEFAULT_LIMIT`, `ANSWER_LIMIT_MIN_ONE`, `LLM_TIMEOUT_SECS`
    /// and the question bank variables.
    ///
    /// # Errors
    /// [`AnswerError::Config`] / [`AnswerError::Store`] on malformed values.
    pub fn from_env() -> Result<Self, AnswerError> {
        let lower_bound = if parse("ANSWER_LIMIT_MIN_ONE", false)? {
            LowerBound::One
        } else {
            LowerBound::PassThrough
        };
        Ok(Self {
            default_limit: parse("ANSWER_DEFAULT_LIMIT", DEFAULT_LIMIT)?,
            lower_bound,
            generation_timeout: Duration::from_secs(parse(
                "LLM_TIMEOUT_SECS",
                DEFAULT_GENERATION_TIMEOUT_SECS,
            )?),
            store: StoreConfig::from_env()?,
        })
    }

    /// Limit rules for a corpus of `corpus_len` questions.
    pub fn limit_rules(&self, corpus_len: usize) -> LimitRules {
        LimitRules {
            default: self.default_limit,
            max_limit: Some(corpus_len),
            lower_bound: self.lower_bound,
        }
    }
}

fn parse<T>(k: &str, dflt: T) -> Result<T, AnswerError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(k) {
        Ok(v) if !v.trim().is_empty() => v
            .trim()
            .parse()
            .map_err(|e| AnswerError::Config(format!("{k}: {e}"))),
        _ => Ok(dflt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_cap_at_corpus_size() {
        let cfg = AnswerConfig::new(StoreConfig::new("bank.jsonl"));
        let rules = cfg.limit_rules(25);
        assert_eq!(rules.default, 10);
        assert_eq!(rules.max_limit, Some(25));
        assert_eq!(rules.lower_bound, LowerBound::PassThrough);
    }
}
