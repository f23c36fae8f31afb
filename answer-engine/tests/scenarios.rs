use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use answer_engine::{
    AnswerConfig, AnswerEngine, AnswerError, AnswerOutcome, Generator, LowerBound,
    NO_MATCH_MESSAGE, UNAVAILABLE_MESSAGE,
};
use futures::future::BoxFuture;
use question_store::{Corpus, QuestionRecord, StoreConfig, StoreError, TextEncoder};

/// Every query lands on the x axis; records are spread around it.
struct AxisEncoder {
    calls: AtomicUsize,
    fail: bool,
}

impl AxisEncoder {
    fn ok() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail: false,
        })
    }
}

impl TextEncoder for AxisEncoder {
    fn encode<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, StoreError>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move {
            if self.fail {
                Err(StoreError::Config("embedding backend down".into()))
            } else {
                Ok(vec![1.0, 0.0])
            }
        })
    }
}

enum Reply {
    Text(&'static str),
    Fail,
    Hang,
}

struct FakeGenerator {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Generator for FakeGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AnswerError>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Box::pin(async move {
            match self.reply {
                Reply::Text(t) => Ok(t.to_string()),
                Reply::Fail => Err(AnswerError::Config("API key not valid".into())),
                Reply::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(String::new())
                }
            }
        })
    }
}

/// 15 records; similarity to the x axis decreases with the index.
fn corpus() -> Arc<Corpus> {
    let sources = [
        Some("Geography 2015"),
        Some("Grade 12 History 2012"),
        None,
        Some("Civics 2010"),
        Some("history 2016"),
    ];
    let records = (0..15)
        .map(|i| QuestionRecord {
            text: format!("Question about topic {i}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            source: sources[i % sources.len()].map(Into::into),
            embedding: vec![1.0, i as f32 * 0.1],
        })
        .collect();
    Arc::new(Corpus::new(records).unwrap())
}

fn cfg() -> AnswerConfig {
    AnswerConfig::new(StoreConfig::new("unused.jsonl"))
}

fn engine(enc: Arc<AxisEncoder>, generator: Arc<FakeGenerator>, cfg: &AnswerConfig) -> AnswerEngine {
    AnswerEngine::new(corpus(), enc, generator, cfg)
}

#[tokio::test]
async fn explicit_count_and_subject_filter_ranked_hits() {
    let generator = FakeGenerator::new(Reply::Text("  1) Answer A  \n"));
    let e = engine(AxisEncoder::ok(), generator.clone(), &cfg());

    let out = e.answer("give me 3 history questions").await;
    assert_eq!(out, AnswerOutcome::Success("1) Answer A".into()));

    // top 3 are records 0,1,2; only record 1 has a history source
    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Question 1: Question about topic 1\n"));
    assert!(!prompts[0].contains("Question 2:"));
    assert!(prompts[0].contains("D) [Missing Option]"));
}

#[tokio::test]
async fn subject_without_hits_is_no_match() {
    let generator = FakeGenerator::new(Reply::Text("unused"));
    let e = engine(AxisEncoder::ok(), generator.clone(), &cfg());

    let out = e.answer("2 biology questions").await;
    assert_eq!(out, AnswerOutcome::NoMatch);
    assert_eq!(out.message(), NO_MATCH_MESSAGE);
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn no_count_no_subject_forwards_default_top_ten() {
    let generator = FakeGenerator::new(Reply::Text("ok"));
    let e = engine(AxisEncoder::ok(), generator.clone(), &cfg());

    assert_eq!(e.answer("tell me about rivers").await, AnswerOutcome::Success("ok".into()));
    let p = &generator.prompts()[0];
    assert!(p.contains("Question 10: Question about topic 9\n"));
    assert!(!p.contains("Question 11:"));
    assert!(p.contains("Source: [Source not available]"));
}

#[tokio::test]
async fn count_above_corpus_size_is_clamped() {
    let generator = FakeGenerator::new(Reply::Text("ok"));
    let e = engine(AxisEncoder::ok(), generator.clone(), &cfg());

    e.answer("show me 500 questions").await;
    let p = &generator.prompts()[0];
    assert!(p.contains("Question 15:"));
    assert!(!p.contains("Question 16:"));
}

#[tokio::test]
async fn zero_count_passes_through_or_lifts_to_one() {
    let generator = FakeGenerator::new(Reply::Text("ok"));
    let enc = AxisEncoder::ok();
    let e = engine(enc.clone(), generator.clone(), &cfg());
    assert_eq!(e.answer("0 questions").await, AnswerOutcome::NoMatch);
    assert_eq!(enc.calls.load(Ordering::SeqCst), 0);

    let mut lifted = cfg();
    lifted.lower_bound = LowerBound::One;
    let e = engine(AxisEncoder::ok(), generator.clone(), &lifted);
    assert_eq!(e.answer("0 questions").await, AnswerOutcome::Success("ok".into()));
    assert!(generator.prompts()[0].contains("Question 1:"));
}

#[tokio::test]
async fn failed_load_is_unavailable_without_retrieval() {
    let e = AnswerEngine::unavailable("io error: No such file or directory");
    let out = e.answer("give me 3 history questions").await;
    assert_eq!(out.message(), UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn empty_corpus_is_unavailable() {
    let enc = AxisEncoder::ok();
    let e = AnswerEngine::new(
        Arc::new(Corpus::empty()),
        enc.clone(),
        FakeGenerator::new(Reply::Text("x")),
        &cfg(),
    );
    assert_eq!(e.answer("rivers").await, AnswerOutcome::Unavailable);
    assert_eq!(enc.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn generation_error_is_reported_in_message() {
    let e = engine(AxisEncoder::ok(), FakeGenerator::new(Reply::Fail), &cfg());
    let out = e.answer("rivers").await;
    assert_eq!(
        out.message(),
        "Error generating response: config error: API key not valid"
    );
}

#[tokio::test(start_paused = true)]
async fn slow_generation_times_out() {
    let mut c = cfg();
    c.generation_timeout = Duration::from_secs(5);
    let e = engine(AxisEncoder::ok(), FakeGenerator::new(Reply::Hang), &c);
    match e.answer("rivers").await {
        AnswerOutcome::GenerationFailure(detail) => assert!(detail.contains("timed out after 5s")),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn query_embedding_failure_is_retrieval_failure() {
    let enc = Arc::new(AxisEncoder {
        calls: AtomicUsize::new(0),
        fail: true,
    });
    let e = engine(enc, FakeGenerator::new(Reply::Text("x")), &cfg());
    let out = e.answer("rivers").await;
    assert!(matches!(out, AnswerOutcome::RetrievalFailure(_)));
    assert!(out.message().starts_with("Error retrieving questions: "));
}
