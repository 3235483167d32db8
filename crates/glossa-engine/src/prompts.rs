//! Prompt construction for section generators.
//!
//! Every prompt embeds the same shared-context block so sections stay
//! thematically and lexically consistent across independent completion
//! calls.

use std::fmt::Write;

use glossa_core::lesson::Phase;
use glossa_core::SharedContext;

/// System prompt shared by every section generator.
pub(crate) fn system_prompt(ctx: &SharedContext) -> String {
    format!(
        "You are an experienced {} teacher writing material for a {} ({}) learner. \
         Keep vocabulary and grammar appropriate for that level.",
        ctx.target_language,
        ctx.difficulty_level.as_str(),
        ctx.difficulty_level.descriptor(),
    )
}

/// The shared-context block embedded in every section prompt.
fn context_block(ctx: &SharedContext) -> String {
    let mut block = String::new();
    if !ctx.content_summary.is_empty() {
        let _ = writeln!(block, "Source material:\n{}\n", ctx.content_summary);
    }
    if !ctx.key_vocabulary.is_empty() {
        let _ = writeln!(block, "Key vocabulary: {}", ctx.key_vocabulary.join(", "));
    }
    if !ctx.main_themes.is_empty() {
        let _ = writeln!(block, "Themes: {}", ctx.main_themes.join(", "));
    }
    block
}

/// Prompt for a plain text phase.
pub(crate) fn section_prompt(phase: Phase, ctx: &SharedContext) -> String {
    let instruction = match phase {
        Phase::Warmup => {
            "Write 3 short warm-up questions that activate the learner's prior \
             knowledge of the topic."
        }
        Phase::Vocabulary => {
            "Present each key vocabulary term with a level-appropriate definition \
             and one example sentence."
        }
        Phase::Reading => {
            "Write a reading passage of 150-250 words adapted from the source \
             material, using the key vocabulary naturally."
        }
        Phase::Discussion => {
            "Write 5 open-ended discussion questions about the topic that invite \
             personal opinions."
        }
        Phase::Grammar => {
            "Pick one grammar point suited to the level, explain it briefly, and \
             give 4 example sentences drawn from the topic plus 3 practice items."
        }
        Phase::Pronunciation => {
            "List 5 words or phrases from the key vocabulary that learners at \
             this level commonly mispronounce, with short pronunciation tips."
        }
        Phase::Wrapup => {
            "Write a short wrap-up: 2 review questions and one takeaway sentence \
             summarizing the lesson."
        }
        // Comprehension and dialogue prompts carry extra inputs; see below.
        Phase::Comprehension | Phase::Dialogue => unreachable!("phase has a dedicated prompt"),
    };

    format!("{}{}", context_block(ctx), instruction)
}

/// Prompt for comprehension questions over the generated reading passage.
pub(crate) fn comprehension_prompt(ctx: &SharedContext, passage: &str) -> String {
    format!(
        "{}Reading passage:\n{}\n\nWrite 5 comprehension questions about this \
         passage: 3 literal and 2 inferential. Number them.",
        context_block(ctx),
        passage,
    )
}

fn dialogue_format_rules() -> &'static str {
    "Respond with only a JSON array, no prose. Each element is an object with \
     \"character\" and \"line\" fields. The dialogue must be at least 12 lines \
     long, speakers must strictly alternate, and the first speaker must be \
     \"Student\"."
}

/// Prompt for the practice dialogue variant.
pub(crate) fn dialogue_practice_prompt(ctx: &SharedContext) -> String {
    format!(
        "{}Write a natural practice dialogue between \"Student\" and \"Teacher\" \
         about the topic, weaving in the key vocabulary. {}",
        context_block(ctx),
        dialogue_format_rules(),
    )
}

/// Prompt for the fill-gap dialogue variant.
pub(crate) fn dialogue_fill_gap_prompt(ctx: &SharedContext) -> String {
    format!(
        "{}Write a fill-in-the-blank dialogue between \"Student\" and \"Teacher\" \
         about the topic, weaving in the key vocabulary. {} Mask one key word in \
         at least 3 lines with \"_____\" and set \"isGap\": true on those lines.",
        context_block(ctx),
        dialogue_format_rules(),
    )
}
