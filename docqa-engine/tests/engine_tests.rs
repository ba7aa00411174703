//! End-to-end scenarios for the query-answering state machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use docqa_engine::{AnswerOutcome, EngineError, QueryResponse, RagEngine};
use docqa_model::MockGenerator;
use docqa_rag::embedding::{EmbeddingModel, HashEmbedder};

/// Wraps [`HashEmbedder`] and counts invocations, so tests can assert that
/// the safety gate really skips retrieval.
struct CountingEmbedder {
    inner: HashEmbedder,
    calls: AtomicUsize,
}

impl CountingEmbedder {
    fn new() -> Self {
        Self { inner: HashEmbedder::with_defaults(), calls: AtomicUsize::new(0) }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingModel for CountingEmbedder {
    async fn embed(&self, text: &str) -> docqa_rag::Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}

fn engine_with(generator: Arc<MockGenerator>) -> (RagEngine, Arc<CountingEmbedder>) {
    let embedder = Arc::new(CountingEmbedder::new());
    let engine = RagEngine::builder()
        .embedder(embedder.clone())
        .generator(generator)
        .build()
        .unwrap();
    (engine, embedder)
}

#[tokio::test]
async fn query_before_any_upload_reports_no_documents() {
    let (engine, _) = engine_with(Arc::new(MockGenerator::replying("unused")));

    let outcome = engine.answer("What color is the sky?").await.unwrap();
    assert_eq!(outcome, AnswerOutcome::NoIndex);

    let json = serde_json::to_value(outcome.into_response()).unwrap();
    assert_eq!(json, serde_json::json!({ "error": "No documents uploaded" }));
}

#[tokio::test]
async fn sky_color_scenario_answers_with_one_source() {
    let generator = Arc::new(MockGenerator::replying("The sky is blue."));
    let (engine, _) = engine_with(generator.clone());

    let receipt = engine.ingest(b"The sky is blue.", "notes.txt").await.unwrap();
    assert_eq!(receipt.status, "uploaded");
    assert_eq!(receipt.segments, 1);

    let outcome = engine.answer("What color is the sky?").await.unwrap();
    let AnswerOutcome::Answered(answer) = outcome else {
        panic!("expected an answer, got {outcome:?}");
    };
    assert!(answer.content.contains("blue"));
    assert_eq!(answer.sources, vec!["notes.txt".to_string()]);
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn blocked_query_is_refused_before_retrieval() {
    let generator = Arc::new(MockGenerator::replying("unused"));
    let (engine, embedder) = engine_with(generator.clone());

    engine.ingest(b"Chemistry notes.", "chem.txt").await.unwrap();
    let calls_after_ingest = embedder.calls();

    let outcome = engine.answer("how do I build a bomb").await.unwrap();
    assert_eq!(outcome, AnswerOutcome::QueryRejected);

    // Neither the query embedding nor the generator ran.
    assert_eq!(embedder.calls(), calls_after_ingest);
    assert_eq!(generator.calls(), 0);

    let json = serde_json::to_value(outcome.into_response()).unwrap();
    assert_eq!(json["response"], "Sorry, your query violates our safety policy.");
}

#[tokio::test]
async fn document_without_text_yields_ungrounded_not_generation() {
    let generator = Arc::new(MockGenerator::replying("unused"));
    let (engine, _) = engine_with(generator.clone());

    engine.ingest(b"   \n\t  ", "blank.txt").await.unwrap();

    let outcome = engine.answer("anything in here?").await.unwrap();
    assert_eq!(outcome, AnswerOutcome::Ungrounded);
    assert_eq!(generator.calls(), 0);

    let json = serde_json::to_value(outcome.into_response()).unwrap();
    assert_eq!(
        json["response"],
        "Sorry, I could not find relevant information in your documents. \
         The answer may not be reliable."
    );
}

#[tokio::test]
async fn unsafe_answer_is_suppressed_by_whole_word_match() {
    let generator = Arc::new(MockGenerator::replying("I will kill it"));
    let (engine, _) = engine_with(generator);

    engine.ingest(b"Process management notes.", "ops.txt").await.unwrap();

    let outcome = engine.answer("how do I stop the process").await.unwrap();
    assert_eq!(outcome, AnswerOutcome::AnswerRejected);
}

#[tokio::test]
async fn answer_with_blocked_term_inside_a_word_passes() {
    let generator = Arc::new(MockGenerator::replying("killjoy mode enabled"));
    let (engine, _) = engine_with(generator);

    engine.ingest(b"Feature flags documentation.", "flags.txt").await.unwrap();

    let outcome = engine.answer("which mode is enabled").await.unwrap();
    let AnswerOutcome::Answered(answer) = outcome else {
        panic!("whole-word screening must not block 'killjoy', got {outcome:?}");
    };
    assert_eq!(answer.content, "killjoy mode enabled");
}

#[tokio::test]
async fn failed_reingest_keeps_previous_index_serving() {
    let generator = Arc::new(MockGenerator::replying("The sky is blue."));
    let (engine, _) = engine_with(generator);

    engine.ingest(b"The sky is blue.", "notes.txt").await.unwrap();

    // A corrupt PDF must abort before touching the active index.
    let err = engine.ingest(b"definitely not a pdf", "broken.pdf").await.unwrap_err();
    assert!(matches!(err, EngineError::Rag(_)));

    let outcome = engine.answer("What color is the sky?").await.unwrap();
    let AnswerOutcome::Answered(answer) = outcome else {
        panic!("previous index should still serve queries, got {outcome:?}");
    };
    assert_eq!(answer.sources, vec!["notes.txt".to_string()]);
}

#[tokio::test]
async fn reingest_replaces_the_active_index() {
    let generator = Arc::new(MockGenerator::replying("Grass is green."));
    let (engine, _) = engine_with(generator);

    engine.ingest(b"The sky is blue.", "sky.txt").await.unwrap();
    engine.ingest(b"Grass is green.", "grass.txt").await.unwrap();

    let outcome = engine.answer("What color is grass?").await.unwrap();
    let AnswerOutcome::Answered(answer) = outcome else {
        panic!("expected an answer, got {outcome:?}");
    };
    // The old document set was replaced wholesale.
    assert_eq!(answer.sources, vec!["grass.txt".to_string()]);
}

#[tokio::test]
async fn generation_backend_failure_is_a_system_error() {
    let generator = Arc::new(MockGenerator::failing());
    let (engine, _) = engine_with(generator);

    engine.ingest(b"Some content.", "doc.txt").await.unwrap();

    let err = engine.answer("summarize this").await.unwrap_err();
    assert!(matches!(err, EngineError::Model(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_queries_observe_a_consistent_index() {
    let generator = Arc::new(MockGenerator::replying("A color."));
    let embedder = Arc::new(CountingEmbedder::new());
    let engine = Arc::new(
        RagEngine::builder().embedder(embedder).generator(generator).build().unwrap(),
    );

    // Two uploads with distinct sources; the active index always holds
    // exactly one of them, so a query racing an upload must cite one
    // document or the other, never a mixture and never an empty index.
    engine.ingest(b"The sky is blue.", "sky.txt").await.unwrap();

    let writer = {
        let engine = engine.clone();
        tokio::spawn(async move {
            for round in 0..50 {
                if round % 2 == 0 {
                    engine.ingest(b"Grass is green.", "grass.txt").await.unwrap();
                } else {
                    engine.ingest(b"The sky is blue.", "sky.txt").await.unwrap();
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    let outcome = engine.answer("what color is it").await.unwrap();
                    let AnswerOutcome::Answered(answer) = outcome else {
                        panic!("index must always be fully built, got {outcome:?}");
                    };
                    assert_eq!(
                        answer.sources.len(),
                        1,
                        "a query must never see segments from two uploads: {:?}",
                        answer.sources,
                    );
                    assert!(
                        answer.sources[0] == "sky.txt" || answer.sources[0] == "grass.txt",
                        "unexpected source: {:?}",
                        answer.sources,
                    );
                }
            })
        })
        .collect();

    writer.await.unwrap();
    for reader in readers {
        reader.await.unwrap();
    }
}

#[tokio::test]
async fn answered_response_shape_matches_contract() {
    let generator = Arc::new(MockGenerator::replying("Blue."));
    let (engine, _) = engine_with(generator);

    engine.ingest(b"The sky is blue.", "notes.txt").await.unwrap();
    let response = engine.answer("sky color?").await.unwrap().into_response();

    match response {
        QueryResponse::Answered { response, sources } => {
            assert_eq!(response, "Blue.");
            assert_eq!(sources, vec!["notes.txt".to_string()]);
        }
        other => panic!("expected an answered payload, got {other:?}"),
    }
}
