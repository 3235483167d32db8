use async_trait::async_trait;

use glossa_core::errors::GatewayError;

/// Options controlling a completion call.
#[derive(Clone, Debug, Default)]
pub struct CompletionOptions {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub system: Option<String>,
    pub stop_sequences: Vec<String>,
}

/// Trait implemented by each completion backend.
///
/// This is the unit of suspension for every section generator: one call,
/// one prompt, one completed text. Streaming is deliberately not part of
/// the contract — the pipeline consumes whole sections.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging ("anthropic", "mock", ...).
    fn name(&self) -> &str;

    /// Model identifier recorded in lesson metadata.
    fn model(&self) -> &str;

    /// Run one completion call.
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, GatewayError>;
}
