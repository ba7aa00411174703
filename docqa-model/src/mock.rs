//! Mock generation model for tests and zero-API-key demos.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{GenerationModel, ModelError, Result};

type ReplyFn = dyn Fn(&str) -> String + Send + Sync;

/// A [`GenerationModel`] that replies from a fixed string or a closure.
///
/// Counts invocations so tests can assert that generation was (or was not)
/// reached by the orchestrator's gates.
///
/// # Example
///
/// ```rust
/// use docqa_model::MockGenerator;
///
/// let model = MockGenerator::replying("The sky is blue.");
/// assert_eq!(model.calls(), 0);
/// ```
pub struct MockGenerator {
    reply: Arc<ReplyFn>,
    calls: AtomicUsize,
    fail: bool,
}

impl MockGenerator {
    /// Reply with the same fixed text for every prompt.
    pub fn replying(text: impl Into<String>) -> Self {
        let text = text.into();
        Self { reply: Arc::new(move |_| text.clone()), calls: AtomicUsize::new(0), fail: false }
    }

    /// Reply with a function of the prompt.
    pub fn with_fn(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self { reply: Arc::new(f), calls: AtomicUsize::new(0), fail: false }
    }

    /// Fail every call with a backend error, for system-failure paths.
    pub fn failing() -> Self {
        Self { reply: Arc::new(|_| String::new()), calls: AtomicUsize::new(0), fail: true }
    }

    /// Number of times [`generate`](GenerationModel::generate) was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationModel for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ModelError::Backend {
                provider: "mock".into(),
                message: "simulated backend failure".into(),
            });
        }
        Ok((self.reply)(prompt))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
