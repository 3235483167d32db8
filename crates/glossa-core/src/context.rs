//! Shared generation context.

use serde::{Deserialize, Serialize};

use crate::level::CefrLevel;

/// The single immutable summary of source content threaded into every
/// section generator.
///
/// Built exactly once per generation request by the shared context builder
/// in `glossa-engine`, owned by the orchestrator for the lifetime of that
/// request, and never mutated after construction. Sections stay thematically
/// and lexically consistent because they all read this one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedContext {
    /// Most-salient terms from the source content, unique, ranked.
    pub key_vocabulary: Vec<String>,
    /// Coarse thematic groupings over the same content.
    pub main_themes: Vec<String>,
    /// Target proficiency band for the request.
    pub difficulty_level: CefrLevel,
    /// Bounded, sentence-boundary-respecting summary of the source content.
    pub content_summary: String,
    /// Language the lesson teaches.
    pub target_language: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_wire_format() {
        let ctx = SharedContext {
            key_vocabulary: vec!["economy".into(), "trade".into()],
            main_themes: vec!["Economy".into()],
            difficulty_level: CefrLevel::B1,
            content_summary: "Trade shapes the economy.".into(),
            target_language: "English".into(),
        };
        let json = serde_json::to_value(&ctx).unwrap();
        assert!(json.get("keyVocabulary").is_some());
        assert!(json.get("mainThemes").is_some());
        assert!(json.get("difficultyLevel").is_some());
        assert!(json.get("contentSummary").is_some());
        assert!(json.get("targetLanguage").is_some());
    }
}
