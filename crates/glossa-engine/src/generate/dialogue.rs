//! Dialogue generators.
//!
//! The most constrained generators in the pipeline. Both variants parse the
//! completion into dialogue lines and enforce the structural contract
//! before returning: at least [`MIN_DIALOGUE_LINES`] lines, strictly
//! alternating speakers, and "Student" opening. The fill-gap variant
//! additionally requires [`MIN_GAP_LINES`] gap-marked lines.

use glossa_core::dialogue::DialogueLine;
use glossa_core::lesson::{LessonSection, Phase, SectionBody};
use glossa_core::SharedContext;
use glossa_llm::CompletionProvider;
use tracing::debug;

use crate::errors::EngineError;
use crate::generate::complete_text;
use crate::prompts;

/// Minimum line count for a generated dialogue.
pub const MIN_DIALOGUE_LINES: usize = 12;

/// Minimum gap-marked lines in a fill-gap dialogue.
pub const MIN_GAP_LINES: usize = 3;

/// Fixed opening speaker role.
pub const OPENING_SPEAKER: &str = "Student";

/// Completion budget for dialogues (longer than plain sections).
const DIALOGUE_MAX_TOKENS: u32 = 2048;

/// Generate the practice dialogue variant.
pub async fn generate_dialogue_practice(
    provider: &dyn CompletionProvider,
    ctx: &SharedContext,
) -> Result<LessonSection, EngineError> {
    let prompt = prompts::dialogue_practice_prompt(ctx);
    generate(provider, ctx, &prompt, false).await
}

/// Generate the fill-gap dialogue variant.
pub async fn generate_dialogue_fill_gap(
    provider: &dyn CompletionProvider,
    ctx: &SharedContext,
) -> Result<LessonSection, EngineError> {
    let prompt = prompts::dialogue_fill_gap_prompt(ctx);
    generate(provider, ctx, &prompt, true).await
}

async fn generate(
    provider: &dyn CompletionProvider,
    ctx: &SharedContext,
    prompt: &str,
    fill_gap: bool,
) -> Result<LessonSection, EngineError> {
    let raw = complete_text(provider, ctx, Phase::Dialogue, prompt, DIALOGUE_MAX_TOKENS).await?;
    let lines = parse_dialogue(&raw)?;

    if let Err(reason) = check_structure(&lines, fill_gap) {
        return Err(EngineError::MalformedSection {
            phase: Phase::Dialogue,
            reason,
        });
    }

    debug!(lines = lines.len(), fill_gap, "dialogue generated");

    Ok(LessonSection {
        phase: Phase::Dialogue,
        title: Phase::Dialogue.section_title().to_owned(),
        body: SectionBody::Dialogue { lines },
    })
}

/// Parse a completion into dialogue lines.
///
/// Models wrap JSON in code fences or lead with prose often enough that we
/// locate the outermost JSON array before deserializing.
fn parse_dialogue(raw: &str) -> Result<Vec<DialogueLine>, EngineError> {
    let json = extract_json_array(raw).ok_or_else(|| EngineError::MalformedSection {
        phase: Phase::Dialogue,
        reason: "completion contained no JSON array".into(),
    })?;

    serde_json::from_str(json).map_err(|e| EngineError::MalformedSection {
        phase: Phase::Dialogue,
        reason: format!("dialogue JSON did not parse: {e}"),
    })
}

/// Slice out the outermost `[ ... ]` of the completion, if any.
fn extract_json_array(raw: &str) -> Option<&str> {
    let start = raw.find('[')?;
    let end = raw.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Check the structural contract. Returns the violation, if any.
fn check_structure(lines: &[DialogueLine], fill_gap: bool) -> Result<(), String> {
    if lines.len() < MIN_DIALOGUE_LINES {
        return Err(format!(
            "dialogue has {} lines, minimum is {MIN_DIALOGUE_LINES}",
            lines.len()
        ));
    }

    if lines[0].character != OPENING_SPEAKER {
        return Err(format!(
            "first speaker is \"{}\", expected \"{OPENING_SPEAKER}\"",
            lines[0].character
        ));
    }

    for (idx, pair) in lines.windows(2).enumerate() {
        if pair[0].character == pair[1].character {
            return Err(format!(
                "speaker \"{}\" repeats on consecutive lines {} and {}",
                pair[0].character,
                idx + 1,
                idx + 2
            ));
        }
    }

    if fill_gap {
        let gaps = lines.iter().filter(|l| l.is_gap_marked()).count();
        if gaps < MIN_GAP_LINES {
            return Err(format!(
                "fill-gap dialogue has {gaps} gap lines, minimum is {MIN_GAP_LINES}"
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_core::level::CefrLevel;
    use glossa_llm::{MockCompletion, MockProvider};

    fn ctx() -> SharedContext {
        SharedContext {
            key_vocabulary: vec!["economy".into(), "trade".into()],
            main_themes: vec!["Economy".into()],
            difficulty_level: CefrLevel::B1,
            content_summary: "Trade shapes the economy.".into(),
            target_language: "English".into(),
        }
    }

    /// A valid alternating dialogue as the model should return it.
    fn dialogue_json(line_count: usize, gap_count: usize) -> String {
        let lines: Vec<serde_json::Value> = (0..line_count)
            .map(|i| {
                let character = if i % 2 == 0 { "Student" } else { "Teacher" };
                if i < gap_count {
                    serde_json::json!({
                        "character": character,
                        "line": format!("Line {i} about the _____ of trade."),
                        "isGap": true,
                    })
                } else {
                    serde_json::json!({
                        "character": character,
                        "line": format!("Line {i} about the economy and trade."),
                    })
                }
            })
            .collect();
        serde_json::to_string(&lines).unwrap()
    }

    #[tokio::test]
    async fn practice_dialogue_happy_path() {
        let mock = MockProvider::new(vec![MockCompletion::text(dialogue_json(12, 0))]);
        let section = generate_dialogue_practice(&mock, &ctx()).await.unwrap();

        let lines = section.body.as_dialogue().unwrap();
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0].character, "Student");
    }

    #[tokio::test]
    async fn tolerates_code_fences() {
        let fenced = format!("```json\n{}\n```", dialogue_json(12, 0));
        let mock = MockProvider::new(vec![MockCompletion::text(fenced)]);
        let section = generate_dialogue_practice(&mock, &ctx()).await.unwrap();
        assert_eq!(section.body.as_dialogue().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn tolerates_leading_prose() {
        let wrapped = format!("Here is the dialogue:\n\n{}", dialogue_json(14, 0));
        let mock = MockProvider::new(vec![MockCompletion::text(wrapped)]);
        let section = generate_dialogue_practice(&mock, &ctx()).await.unwrap();
        assert_eq!(section.body.as_dialogue().unwrap().len(), 14);
    }

    #[tokio::test]
    async fn too_few_lines_is_malformed() {
        let mock = MockProvider::new(vec![MockCompletion::text(dialogue_json(8, 0))]);
        let err = generate_dialogue_practice(&mock, &ctx()).await.unwrap_err();
        match err {
            EngineError::MalformedSection { reason, .. } => {
                assert!(reason.contains("minimum is 12"), "{reason}");
            }
            other => panic!("expected MalformedSection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn wrong_first_speaker_is_malformed() {
        let mut raw: Vec<serde_json::Value> =
            serde_json::from_str(&dialogue_json(12, 0)).unwrap();
        raw[0]["character"] = serde_json::json!("Teacher");
        raw[1]["character"] = serde_json::json!("Student");
        let mock = MockProvider::new(vec![MockCompletion::text(
            serde_json::to_string(&raw).unwrap(),
        )]);

        let err = generate_dialogue_practice(&mock, &ctx()).await.unwrap_err();
        match err {
            EngineError::MalformedSection { reason, .. } => {
                assert!(reason.contains("first speaker"), "{reason}");
            }
            other => panic!("expected MalformedSection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn repeated_speaker_is_malformed() {
        let mut raw: Vec<serde_json::Value> =
            serde_json::from_str(&dialogue_json(12, 0)).unwrap();
        // Index 5 is a Teacher slot; making 6 Teacher as well breaks alternation.
        raw[6]["character"] = serde_json::json!("Teacher");
        let mock = MockProvider::new(vec![MockCompletion::text(
            serde_json::to_string(&raw).unwrap(),
        )]);

        let err = generate_dialogue_practice(&mock, &ctx()).await.unwrap_err();
        match err {
            EngineError::MalformedSection { reason, .. } => {
                assert!(reason.contains("repeats"), "{reason}");
            }
            other => panic!("expected MalformedSection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_completion_is_malformed() {
        let mock = MockProvider::new(vec![MockCompletion::text("Sorry, I cannot help.")]);
        let err = generate_dialogue_practice(&mock, &ctx()).await.unwrap_err();
        match err {
            EngineError::MalformedSection { reason, .. } => {
                assert!(reason.contains("no JSON array"), "{reason}");
            }
            other => panic!("expected MalformedSection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fill_gap_requires_three_gaps() {
        let mock = MockProvider::new(vec![MockCompletion::text(dialogue_json(12, 2))]);
        let err = generate_dialogue_fill_gap(&mock, &ctx()).await.unwrap_err();
        match err {
            EngineError::MalformedSection { reason, .. } => {
                assert!(reason.contains("gap lines"), "{reason}");
            }
            other => panic!("expected MalformedSection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fill_gap_happy_path() {
        let mock = MockProvider::new(vec![MockCompletion::text(dialogue_json(12, 4))]);
        let section = generate_dialogue_fill_gap(&mock, &ctx()).await.unwrap();

        let lines = section.body.as_dialogue().unwrap();
        let gaps = lines.iter().filter(|l| l.is_gap_marked()).count();
        assert!(gaps >= MIN_GAP_LINES);
    }

    #[tokio::test]
    async fn gap_detected_via_placeholder_without_flag() {
        // Lines carry the placeholder token but no isGap flag.
        let lines: Vec<serde_json::Value> = (0..12)
            .map(|i| {
                let character = if i % 2 == 0 { "Student" } else { "Teacher" };
                let line = if i < 3 {
                    format!("Line {i} with a _____ in it.")
                } else {
                    format!("Line {i} about trade.")
                };
                serde_json::json!({ "character": character, "line": line })
            })
            .collect();
        let mock = MockProvider::new(vec![MockCompletion::text(
            serde_json::to_string(&lines).unwrap(),
        )]);

        let section = generate_dialogue_fill_gap(&mock, &ctx()).await.unwrap();
        assert!(section.body.as_dialogue().is_some());
    }
}
