//! Section generators.
//!
//! One generator per lesson phase, each backed by exactly one completion
//! call. Generators surface typed failures — a failed call or unusable
//! content aborts the phase; retry policy belongs to the provider layer.

pub mod dialogue;

use glossa_core::lesson::{LessonSection, LessonType, Phase, SectionBody};
use glossa_core::SharedContext;
use glossa_llm::{CompletionOptions, CompletionProvider};
use tracing::debug;

use crate::errors::EngineError;
use crate::prompts;

/// Default completion budget for a text section.
const SECTION_MAX_TOKENS: u32 = 1024;

/// Default sampling temperature for lesson content.
const SECTION_TEMPERATURE: f64 = 0.7;

pub(crate) fn section_options(ctx: &SharedContext, max_tokens: u32) -> CompletionOptions {
    CompletionOptions {
        max_tokens: Some(max_tokens),
        temperature: Some(SECTION_TEMPERATURE),
        system: Some(prompts::system_prompt(ctx)),
        stop_sequences: Vec::new(),
    }
}

/// Run one completion call and require non-empty text back.
pub(crate) async fn complete_text(
    provider: &dyn CompletionProvider,
    ctx: &SharedContext,
    phase: Phase,
    prompt: &str,
    max_tokens: u32,
) -> Result<String, EngineError> {
    let options = section_options(ctx, max_tokens);
    let text = provider.complete(prompt, &options).await?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MalformedSection {
            phase,
            reason: "completion was empty".into(),
        });
    }
    Ok(trimmed.to_owned())
}

/// Generate the section for one phase.
///
/// `prior` holds the sections generated so far this request; phases that
/// depend on an earlier phase's output (comprehension reads the reading
/// passage) take it from there explicitly — there is no shared mutable
/// state between generators.
pub async fn generate_section(
    provider: &dyn CompletionProvider,
    ctx: &SharedContext,
    phase: Phase,
    lesson_type: LessonType,
    prior: &[LessonSection],
) -> Result<LessonSection, EngineError> {
    debug!(%phase, "generating section");

    match phase {
        Phase::Dialogue => {
            // Grammar lessons drill with the fill-gap variant.
            if lesson_type == LessonType::Grammar {
                dialogue::generate_dialogue_fill_gap(provider, ctx).await
            } else {
                dialogue::generate_dialogue_practice(provider, ctx).await
            }
        }
        Phase::Comprehension => {
            let passage = prior
                .iter()
                .find(|s| s.phase == Phase::Reading)
                .and_then(|s| match &s.body {
                    SectionBody::Text { text } => Some(text.as_str()),
                    SectionBody::Dialogue { .. } => None,
                })
                .unwrap_or(&ctx.content_summary);
            let prompt = prompts::comprehension_prompt(ctx, passage);
            let text = complete_text(provider, ctx, phase, &prompt, SECTION_MAX_TOKENS).await?;
            Ok(text_section(phase, text))
        }
        _ => {
            let prompt = prompts::section_prompt(phase, ctx);
            let text = complete_text(provider, ctx, phase, &prompt, SECTION_MAX_TOKENS).await?;
            Ok(text_section(phase, text))
        }
    }
}

fn text_section(phase: Phase, text: String) -> LessonSection {
    LessonSection {
        phase,
        title: phase.section_title().to_owned(),
        body: SectionBody::Text { text },
    }
}
