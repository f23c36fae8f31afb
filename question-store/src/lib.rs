//! In-memory exam question bank.
//!
//! This crate provides:
//! - JSONL loading with precomputed or load-time embeddings
//! - An immutable [`Corpus`] ranked by a pluggable [`NearestNeighborIndex`]
//! - [`search`]: encode a query once and return the top-N similar questions
//!
//! Everything is read-only after [`load_corpus`], so one `Arc<Corpus>` can be
//! shared by all request handlers.

mod config;
mod corpus;
mod embed;
mod embed_pool;
mod errors;
mod index;
mod ingest;
mod io_jsonl;
mod progress;
mod record;
mod search;

pub use config::{DEFAULT_EMBEDDING_CONCURRENCY, DEFAULT_QUESTION_BANK_PATH, StoreConfig};
pub use corpus::Corpus;
pub use embed::{EmbeddingPolicy, TextEncoder, llm_encoder::LlmEncoder};
pub use errors::StoreError;
pub use index::{LinearScanIndex, NearestNeighborIndex, Neighbor, cosine_similarity};
pub use ingest::{build_corpus, load_corpus};
pub use io_jsonl::read_question_rows;
pub use record::{PendingQuestion, QuestionRecord, RankedResult};
pub use search::search;
