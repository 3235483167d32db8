use glossa_core::errors::GatewayError;
use glossa_core::lesson::Phase;

/// Typed error hierarchy for the generation pipeline.
///
/// Configuration errors indicate a programming/config defect and are raised
/// immediately; gateway and malformed-section errors abort the request with
/// no partial lesson. Observer panics and validation findings never surface
/// here — they are absorbed or returned inline.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Programming or configuration defect (zero active phases, missing
    /// phase weight, empty key vocabulary passed into validation).
    #[error("configuration error: {0}")]
    Config(String),

    /// Source content was empty or whitespace-only.
    #[error("source content is empty")]
    EmptyContent,

    /// The completion call inside a section generator failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// A generator's completion came back unusable.
    #[error("unusable {phase} section: {reason}")]
    MalformedSection { phase: Phase, reason: String },
}
