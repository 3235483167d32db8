//! The standard complexity rules, one per CEFR boundary condition.

use std::collections::HashSet;
use std::sync::LazyLock;

use glossa_core::dialogue::dialogue_text;
use regex::Regex;

use crate::generate::dialogue::{MIN_DIALOGUE_LINES, MIN_GAP_LINES, OPENING_SPEAKER};
use crate::lexical::tokenize;

use super::{ComplexityRule, DialogueInput, Findings};

/// Minimum shared terms expected to appear in the dialogue.
const MIN_INTEGRATED_TERMS: usize = 2;

/// Maximum tolerated fraction of very-simple words at B2/C1.
const SIMPLE_FRACTION_LIMIT: f64 = 0.15;

/// Formal connectives and multi-syllabic words out of place at A1/A2.
const ADVANCED_WORDS: &[&str] = &[
    "nevertheless",
    "consequently",
    "sophisticated",
    "furthermore",
    "notwithstanding",
    "subsequently",
    "albeit",
    "henceforth",
    "nonetheless",
    "predominantly",
    "paradigm",
    "ubiquitous",
    "methodology",
    "comprehensive",
];

/// Basic content words; a B2/C1 dialogue leaning on these reads too simple.
const VERY_SIMPLE_WORDS: &[&str] = &[
    "good", "bad", "big", "small", "nice", "happy", "sad", "fun", "easy", "hard", "cool",
    "hello", "bye", "yes", "okay", "like", "want", "see", "look", "eat", "go", "come",
    "thing", "stuff", "really", "thanks", "please",
];

static PRESENT_PERFECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:have|has|had)\s+(?:been|gone|done|made|seen|taken|given|known|thought|found|told|grown|written|spoken|\w+ed)\b")
        .expect("present perfect pattern")
});

static PASSIVE_VOICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:is|are|was|were|been|being)\s+\w+(?:ed|own|aken|iven|itten)\b")
        .expect("passive voice pattern")
});

static RELATIVE_CLAUSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:who|whom|whose|which|that)\s+\w+").expect("relative clause pattern")
});

static CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bif\b|\b(?:would|could|might)\s+\w+").expect("conditional pattern")
});

/// Checks that the shared vocabulary actually made it into the dialogue.
pub struct VocabularyIntegrationRule;

impl ComplexityRule for VocabularyIntegrationRule {
    fn name(&self) -> &'static str {
        "vocabulary_integration"
    }

    fn evaluate(&self, input: &DialogueInput<'_>, findings: &mut Findings) {
        let text = dialogue_text(input.lines).to_lowercase();
        let found = input
            .key_vocabulary
            .iter()
            .filter(|term| text.contains(&term.to_lowercase()))
            .count();

        if found < MIN_INTEGRATED_TERMS {
            findings.warning(format!(
                "low vocabulary integration: only {found} of {} shared terms appear in the dialogue",
                input.key_vocabulary.len()
            ));
        }
    }
}

/// Flags vocabulary that is out of band for the target level.
pub struct VocabularyComplexityRule;

impl ComplexityRule for VocabularyComplexityRule {
    fn name(&self) -> &'static str {
        "vocabulary_complexity"
    }

    fn evaluate(&self, input: &DialogueInput<'_>, findings: &mut Findings) {
        let text = dialogue_text(input.lines);
        let tokens = tokenize(&text);

        if input.level.is_beginner() {
            let token_set: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for word in ADVANCED_WORDS {
                if token_set.contains(word) {
                    findings.warning(format!(
                        "word \"{word}\" is too advanced for {}",
                        input.level
                    ));
                }
            }
        } else if input.level.is_advanced() && !tokens.is_empty() {
            let simple = tokens
                .iter()
                .filter(|t| VERY_SIMPLE_WORDS.contains(&t.as_str()))
                .count();
            let fraction = simple as f64 / tokens.len() as f64;
            if fraction > SIMPLE_FRACTION_LIMIT {
                findings.warning(format!(
                    "vocabulary too simple for {}: {:.0}% of words are basic",
                    input.level,
                    fraction * 100.0
                ));
            }
        }
    }
}

/// Flags grammar that is out of band for the target level.
pub struct GrammarComplexityRule;

impl ComplexityRule for GrammarComplexityRule {
    fn name(&self) -> &'static str {
        "grammar_complexity"
    }

    fn evaluate(&self, input: &DialogueInput<'_>, findings: &mut Findings) {
        let text = dialogue_text(input.lines).to_lowercase();

        if input.level.is_beginner() {
            if PRESENT_PERFECT.is_match(&text) {
                findings.warning(format!(
                    "present perfect constructions are too advanced for {}",
                    input.level
                ));
            }
            if PASSIVE_VOICE.is_match(&text) {
                findings.warning(format!(
                    "passive voice constructions are too advanced for {}",
                    input.level
                ));
            }
        } else if input.level.is_advanced() && input.lines.len() >= MIN_DIALOGUE_LINES {
            let has_complex = RELATIVE_CLAUSE.is_match(&text)
                || CONDITIONAL.is_match(&text)
                || PRESENT_PERFECT.is_match(&text);
            if !has_complex {
                findings.warning(format!(
                    "no relative clauses, conditionals, or perfect forms found; \
                     grammar reads too simple for {}",
                    input.level
                ));
            }
        }
    }
}

/// Re-checks the dialogue's structural contract as quality signal.
///
/// Falling below the minimum line count is the only fatal issue; the
/// remaining structural findings are advisory.
pub struct StructureRule;

impl ComplexityRule for StructureRule {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn evaluate(&self, input: &DialogueInput<'_>, findings: &mut Findings) {
        let lines = input.lines;

        if lines.len() < MIN_DIALOGUE_LINES {
            findings.issue(format!(
                "dialogue has {} lines, minimum is {MIN_DIALOGUE_LINES}",
                lines.len()
            ));
        }

        if let Some(first) = lines.first() {
            if first.character != OPENING_SPEAKER {
                findings.warning(format!(
                    "first speaker is \"{}\", expected \"{OPENING_SPEAKER}\"",
                    first.character
                ));
            }
        }

        for (idx, pair) in lines.windows(2).enumerate() {
            if pair[0].character == pair[1].character {
                findings.warning(format!(
                    "speaker \"{}\" repeats on consecutive lines {} and {}",
                    pair[0].character,
                    idx + 1,
                    idx + 2
                ));
            }
        }

        if input.fill_gap {
            let gaps = lines.iter().filter(|l| l.is_gap_marked()).count();
            if gaps < MIN_GAP_LINES {
                findings.warning(format!(
                    "fill-gap dialogue has {gaps} gap lines, minimum is {MIN_GAP_LINES}"
                ));
            }
        }
    }
}
