//! Progress reporting events.

use serde::{Deserialize, Serialize};

use crate::lesson::Phase;

/// One progress event pushed to the observer during generation.
///
/// Within one generation request, successive `progress` values are
/// monotonically non-decreasing and the final update equals 100. Updates are
/// ephemeral: pushed one at a time and not retained by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Human-readable description of the current step.
    pub step: String,
    /// Completion percentage, 0..=100.
    pub progress: u8,
    /// Phase this update belongs to.
    pub phase: Phase,
    /// Section identifier, when the step concerns a specific section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let update = ProgressUpdate {
            step: "Generating reading section".into(),
            progress: 40,
            phase: Phase::Reading,
            section: Some("reading".into()),
        };
        let json = serde_json::to_string(&update).unwrap();
        let parsed: ProgressUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, update);
    }

    #[test]
    fn section_skipped_when_absent() {
        let update = ProgressUpdate {
            step: "Starting".into(),
            progress: 0,
            phase: Phase::Warmup,
            section: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("section").is_none());
    }
}
