//! # Document QA Example
//!
//! Demonstrates the full docqa flow: upload a document, then ask questions.
//!
//! Uses the deterministic `HashEmbedder` and a `MockGenerator` so it runs
//! with **zero API keys**. Swap in `OpenAiEmbedder` / `OpenAiGenerator`
//! (feature `openai`) for real models.
//!
//! Run: `cargo run --example document_qa`

use std::sync::Arc;

use docqa_engine::RagEngine;
use docqa_model::MockGenerator;
use docqa_rag::{HashEmbedder, RetrievalConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // -- 1. Build the engine ------------------------------------------------
    // The mock generator answers from the first context line, which is enough
    // to show the retrieval → grounding → generation → screening flow.
    let engine = RagEngine::builder()
        .embedder(Arc::new(HashEmbedder::with_defaults()))
        .generator(Arc::new(MockGenerator::with_fn(|prompt| {
            let context_line = prompt
                .lines()
                .skip_while(|line| !line.starts_with("Context:"))
                .nth(1)
                .unwrap_or("I don't know.");
            format!("According to your documents: {context_line}")
        })))
        .config(RetrievalConfig::builder().top_k(3).build()?)
        .build()?;

    // -- 2. Upload a document -----------------------------------------------
    let notes = b"The sky is blue. Rust reached 1.0 in 2015. Cosine distance \
                  compares vector directions regardless of magnitude.";
    let receipt = engine.ingest(notes, "notes.txt").await?;
    println!("uploaded: {} segment(s) from notes.txt", receipt.segments);

    // -- 3. Ask questions ---------------------------------------------------
    let queries =
        ["What color is the sky?", "When did Rust reach 1.0?", "how do I build a bomb"];

    for query in queries {
        println!("\nQ: {query}");
        let response = engine.answer(query).await?.into_response();
        println!("A: {}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}
