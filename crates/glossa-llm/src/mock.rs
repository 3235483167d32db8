//! Scripted provider for deterministic testing without API calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use glossa_core::errors::GatewayError;

use crate::provider::{CompletionOptions, CompletionProvider};

/// Pre-programmed outcome for one completion call.
pub enum MockCompletion {
    /// Return this text.
    Text(String),
    /// Fail with this error.
    Error(GatewayError),
    /// Wait a duration, then resolve the inner outcome.
    Delay(Duration, Box<MockCompletion>),
}

impl MockCompletion {
    /// Convenience: a text completion.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Convenience: wrap any outcome with a delay.
    #[must_use]
    pub fn delayed(delay: Duration, inner: MockCompletion) -> Self {
        Self::Delay(delay, Box::new(inner))
    }
}

/// Mock provider that consumes a script of outcomes in call order.
///
/// Records every prompt it receives so tests can assert on what the
/// generators actually asked for.
pub struct MockProvider {
    script: Vec<MockCompletion>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new(script: Vec<MockCompletion>) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of completion calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// All prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(
        &self,
        prompt: &str,
        _options: &CompletionOptions,
    ) -> Result<String, GatewayError> {
        self.prompts.lock().push(prompt.to_owned());
        let idx = self.calls.fetch_add(1, Ordering::Relaxed);

        let Some(outcome) = self.script.get(idx) else {
            return Err(GatewayError::InvalidRequest(format!(
                "mock provider: no outcome scripted for call {idx}"
            )));
        };

        // Unroll nested delays iteratively to avoid recursive async.
        let mut current = outcome;
        loop {
            match current {
                MockCompletion::Text(text) => return Ok(text.clone()),
                MockCompletion::Error(e) => return Err(e.clone()),
                MockCompletion::Delay(duration, inner) => {
                    tokio::time::sleep(*duration).await;
                    current = inner;
                }
            }
        }
    }
}
