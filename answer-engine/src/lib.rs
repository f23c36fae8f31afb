//! Retrieval + generation engine for exam-question queries.
//!
//! Public API: [`AnswerEngine::answer`]. It parses the requested count and
//! subject, embeds the query once, ranks the shared question bank, keeps the
//! hits whose source names the subject, builds the prompt and calls the
//! generation model. Every path ends in an [`AnswerOutcome`].

mod api_types;
pub mod cfg;
mod error;
pub mod limit;
mod llm;
pub mod prompt;
pub mod subject;

use std::{sync::Arc, time::Duration, time::Instant};

use ai_llm_service::LlmServiceProfiles;
use question_store::{
    Corpus, EmbeddingPolicy, LlmEncoder, RankedResult, TextEncoder, load_corpus, search,
};
use tracing::{error, info, warn};

pub use api_types::{AnswerOutcome, NO_MATCH_MESSAGE, QueryIntent, UNAVAILABLE_MESSAGE};
pub use cfg::AnswerConfig;
pub use error::AnswerError;
pub use limit::{LimitRules, LowerBound, NUMBER_WORDS, extract_limit, extract_limit_with};
pub use llm::Generator;
pub use prompt::build_prompt;
pub use subject::{Subject, classify_subject, classify_subject_in};

/// Process-lifetime state built once at startup.
///
/// Cheap to share behind an `Arc`; `answer` takes `&self` and never mutates.
pub struct AnswerEngine {
    state: EngineState,
}

enum EngineState {
    Ready(Ready),
    Unavailable { reason: String },
}

struct Ready {
    corpus: Arc<Corpus>,
    encoder: Arc<dyn TextEncoder>,
    generator: Arc<dyn Generator>,
    rules: LimitRules,
    generation_timeout: Duration,
}

impl AnswerEngine {
    /// Engine over an already-loaded corpus.
    ///
    /// An empty corpus gives an unavailable engine.
    pub fn new(
        corpus: Arc<Corpus>,
        encoder: Arc<dyn TextEncoder>,
        generator: Arc<dyn Generator>,
        cfg: &AnswerConfig,
    ) -> Self {
        if corpus.is_empty() {
            return Self::unavailable("question bank is empty");
        }
        let rules = cfg.limit_rules(corpus.len());
        Self {
            state: EngineState::Ready(Ready {
                corpus,
                encoder,
                generator,
                rules,
                generation_timeout: cfg.generation_timeout,
            }),
        }
    }

    /// Engine that answers every query with [`AnswerOutcome::Unavailable`].
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: EngineState::Unavailable {
                reason: reason.into(),
            },
        }
    }

    /// Builds config and LLM profiles from the environment, then bootstraps.
    ///
    /// Never fails; see [`AnswerEngine::bootstrap`].
    pub async fn bootstrap_from_env() -> Self {
        let cfg = match AnswerConfig::from_env() {
            Ok(cfg) => cfg,
            Err(e) => return Self::failed_to_load(e),
        };
        let svc = match LlmServiceProfiles::from_env() {
            Ok(svc) => Arc::new(svc),
            Err(e) => return Self::failed_to_load(e),
        };
        Self::bootstrap(cfg, svc).await
    }

    /// Loads the question bank with the LLM service's embedding profile.
    ///
    /// Never fails: any load error is logged and yields an unavailable engine,
    /// so the HTTP server can still start and report it per request.
    pub async fn bootstrap(cfg: AnswerConfig, svc: Arc<LlmServiceProfiles>) -> Self {
        let encoder = Arc::new(LlmEncoder::new(svc.clone(), cfg.store.expected_dim));
        let policy = if cfg.store.reembed {
            EmbeddingPolicy::ProviderOnly(encoder.as_ref())
        } else {
            EmbeddingPolicy::PrecomputedOr(encoder.as_ref())
        };

        let t0 = Instant::now();
        match load_corpus(&cfg.store, policy).await {
            Ok(corpus) => {
                info!(
                    records = corpus.len(),
                    dim = corpus.dim(),
                    latency_ms = t0.elapsed().as_millis() as u64,
                    "answer engine ready"
                );
                Self::new(Arc::new(corpus), encoder, svc, &cfg)
            }
            Err(e) => Self::failed_to_load(e),
        }
    }

    fn failed_to_load(e: impl std::fmt::Display) -> Self {
        error!(error = %e, "Model or data failed to load");
        Self::unavailable(e.to_string())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, EngineState::Ready(_))
    }

    /// Why startup loading failed, if it did.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match &self.state {
            EngineState::Unavailable { reason } => Some(reason),
            EngineState::Ready(_) => None,
        }
    }

    /// Number of questions served; 0 when unavailable.
    pub fn corpus_len(&self) -> usize {
        match &self.state {
            EngineState::Ready(r) => r.corpus.len(),
            EngineState::Unavailable { .. } => 0,
        }
    }

    /// Answers one query.
    ///
    /// Retrieval, filtering and generation failures are all folded into the
    /// returned [`AnswerOutcome`].
    pub async fn answer(&self, query: &str) -> AnswerOutcome {
        let ready = match &self.state {
            EngineState::Ready(r) => r,
            EngineState::Unavailable { .. } => return AnswerOutcome::Unavailable,
        };

        let intent = QueryIntent::parse(query, &ready.rules);
        let hits = match search(query, ready.encoder.as_ref(), &ready.corpus, intent.limit).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "query retrieval failed");
                return AnswerOutcome::RetrievalFailure(e.to_string());
            }
        };
        let ranked = hits.len();
        let hits = filter_by_subject(hits, intent.subject);

        info!(
            limit = intent.limit,
            subject = intent.subject.map(Subject::as_str),
            ranked,
            hits = hits.len(),
            "questions retrieved"
        );

        if hits.is_empty() {
            return AnswerOutcome::NoMatch;
        }

        let prompt = build_prompt(&hits);
        let t0 = Instant::now();
        let res = tokio::time::timeout(
            ready.generation_timeout,
            ready.generator.generate(&prompt),
        )
        .await;

        match res {
            Ok(Ok(text)) => {
                info!(
                    latency_ms = t0.elapsed().as_millis() as u64,
                    chars = text.len(),
                    "answer generated"
                );
                AnswerOutcome::Success(text.trim().to_string())
            }
            Ok(Err(e)) => {
                warn!(error = %e, "generation failed");
                AnswerOutcome::GenerationFailure(e.to_string())
            }
            Err(_) => {
                let e = AnswerError::Timeout(ready.generation_timeout);
                warn!(error = %e, "generation timed out");
                AnswerOutcome::GenerationFailure(e.to_string())
            }
        }
    }
}

/// Keeps hits whose source contains the subject; no subject keeps all.
fn filter_by_subject<'c>(
    hits: Vec<RankedResult<'c>>,
    subject: Option<Subject>,
) -> Vec<RankedResult<'c>> {
    match subject {
        None => hits,
        Some(s) => hits
            .into_iter()
            .filter(|h| s.matches_source(h.record.source.as_deref()))
            .collect(),
    }
}
