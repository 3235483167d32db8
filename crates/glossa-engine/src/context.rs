//! Shared context construction.

use glossa_core::lesson::LessonType;
use glossa_core::level::CefrLevel;
use glossa_core::text::summarize;
use glossa_core::SharedContext;
use tracing::debug;

use crate::lexical::{derive_themes, extract_key_terms};

/// Maximum summary length in bytes.
const SUMMARY_MAX_LEN: usize = 500;

/// Build the shared context for one generation request.
///
/// Called exactly once per request; the result is never recomputed or
/// mutated afterward. Every section generator reads this value, which is
/// what keeps sections thematically and lexically consistent. No network
/// calls — the distillation is entirely local.
#[must_use]
pub fn build_shared_context(
    content: &str,
    lesson_type: LessonType,
    student_level: CefrLevel,
    target_language: &str,
) -> SharedContext {
    let key_vocabulary = extract_key_terms(content);
    let main_themes = derive_themes(content);
    let content_summary = summarize(content, SUMMARY_MAX_LEN);

    debug!(
        lesson_type = %lesson_type,
        level = %student_level,
        terms = key_vocabulary.len(),
        themes = main_themes.len(),
        summary_bytes = content_summary.len(),
        "shared context built"
    );

    SharedContext {
        key_vocabulary,
        main_themes,
        difficulty_level: student_level,
        content_summary,
        target_language: target_language.to_owned(),
    }
}
